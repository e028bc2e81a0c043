//! Command-line front end: renders the screens to the terminal.

use crate::api::{FileTokenStore, ImageFile, ListingsApi, ListingsClient};
use crate::api::credentials::TOKEN_KEY;
use crate::config::Config;
use crate::form::{DraftIntent, ListingDraft};
use crate::models::{Amenity, Property};
use crate::screens::{
    EditListingScreen, EditView, History, ListingForm, Notifier, Route, ScreenContext, Toast,
    ToastLevel,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "listing-desk", version, about = "Create and edit property listings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the listing index
    List,
    /// Load one listing into the form and print it
    Show { id: String },
    /// Create a listing
    New(EditArgs),
    /// Edit an existing listing
    Edit {
        id: String,
        #[command(flatten)]
        edits: EditArgs,
    },
    /// Manage the stored bearer token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum TokenAction {
    Set { value: String },
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Field assignment, e.g. `title=Sunny Loft` or `location.coordinates.latitude=40.1`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<DraftIntent>,

    /// Amenity to toggle on or off
    #[arg(long = "toggle", value_name = "AMENITY")]
    pub toggle: Vec<Amenity>,

    /// Image file to upload with the listing
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,
}

fn parse_assignment(raw: &str) -> Result<DraftIntent, String> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    DraftIntent::from_assignment(path, value).map_err(|e| e.to_string())
}

/// Prints toasts as they arrive
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => println!("✅ {}", toast.message),
            ToastLevel::Error => eprintln!("❌ {}", toast.message),
        }
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let store = Arc::new(FileTokenStore::new(config.storage.token_store.clone()));
    let api: Arc<dyn ListingsApi> = Arc::new(
        ListingsClient::new(&config.api, store.clone()).context("Failed to create HTTP client")?,
    );
    let history = Arc::new(History::new());
    let ctx = ScreenContext::new(api.clone(), Arc::new(ConsoleNotifier), history.clone());

    match cli.command {
        Command::Token { action } => return run_token(&store, &action),
        Command::List => return render_index(api.as_ref()).await,
        Command::Show { id } => {
            let mut screen = EditListingScreen::mount(ctx, id);
            match screen.settle().await {
                EditView::Form(form) => print_draft(form.draft()),
                EditView::Error(message) => bail!(message),
                EditView::Loading => bail!("Listing is still loading"),
            }
            return Ok(());
        }
        Command::New(edits) => {
            let mut form = ListingForm::create(ctx);
            apply_edits(&mut form, &edits).await?;
            form.submit().await?;
        }
        Command::Edit { id, edits } => {
            let mut screen = EditListingScreen::mount(ctx, id);
            match screen.settle().await {
                EditView::Form(form) => {
                    apply_edits(form, &edits).await?;
                    form.submit().await?;
                }
                EditView::Error(message) => bail!(message),
                EditView::Loading => bail!("Listing is still loading"),
            }
        }
    }

    // A successful submit redirects to the index
    if history.current() == Some(Route::Listings) {
        render_index(api.as_ref()).await?;
    }
    Ok(())
}

fn run_token(store: &FileTokenStore, action: &TokenAction) -> Result<()> {
    match action {
        TokenAction::Set { value } => {
            store.set(TOKEN_KEY, value)?;
            info!("💾 Saved token to {}", store.path().display());
        }
        TokenAction::Clear => {
            if store.remove(TOKEN_KEY)? {
                info!("Removed token from {}", store.path().display());
            } else {
                info!("No token stored");
            }
        }
    }
    Ok(())
}

async fn apply_edits(form: &mut ListingForm, edits: &EditArgs) -> Result<()> {
    for intent in &edits.set {
        form.edit_field(intent.clone());
    }
    for amenity in &edits.toggle {
        form.edit_field(DraftIntent::ToggleAmenity(*amenity));
    }
    if !edits.images.is_empty() {
        let mut files = Vec::with_capacity(edits.images.len());
        for path in &edits.images {
            files.push(ImageFile::read(path).await?);
        }
        form.select_images(files);
    }
    Ok(())
}

async fn render_index(api: &dyn ListingsApi) -> Result<()> {
    let properties = api
        .list_listings()
        .await
        .context("Failed to load listings")?;

    println!("\n{} properties\n", properties.len());
    for (i, property) in properties.iter().enumerate() {
        print_property(i + 1, property);
    }
    Ok(())
}

fn print_property(index: usize, property: &Property) {
    match property.price {
        Some(price) => println!("{}. {} ({}, {})", index, property.title, property.kind, price),
        None => println!("{}. {} ({})", index, property.title, property.kind),
    }
    println!("   {}", property.location.address);
    if let Some(id) = &property.id {
        println!("   ID: {}", id);
    }
    if !property.amenities.is_empty() {
        println!("   Amenities: {}", join_amenities(property.amenities.iter()));
    }
    println!();
}

fn print_draft(draft: &ListingDraft) {
    let blank = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    let coords = &draft.location.coordinates;

    println!("title:       {}", draft.title);
    println!("description: {}", draft.description);
    println!("type:        {}", draft.kind);
    println!("price:       {}", blank(draft.price));
    println!("address:     {}", draft.location.address);
    println!("latitude:    {}", blank(coords.latitude));
    println!("longitude:   {}", blank(coords.longitude));
    println!("amenities:   {}", join_amenities(draft.amenities.iter()));
    println!("images:      {}", draft.images.join(", "));
}

fn join_amenities(amenities: impl Iterator<Item = Amenity>) -> String {
    amenities.map(|a| a.as_str()).collect::<Vec<_>>().join(", ")
}
