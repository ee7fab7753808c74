use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use maquila_client::{CatalogApi, ClientConfig, ClientError, ImageUpload, Verifier};
use maquila_core::batch::BatchInput;
use maquila_core::batch_status;
use maquila_core::dates::parse_date;
use maquila_core::presentation::{BatchCardView, ProductCardView};
use maquila_core::product::ProductInput;
use maquila_core::types::DbId;
use maquila_core::validation::validate_batch;

use crate::output;

#[derive(Debug, Parser)]
#[command(name = "maquila", about = "Product batch catalog and verification", long_about = None)]
pub(crate) struct Cli {
    /// Backend origin; overrides `API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a batch and report whether it is still valid.
    Verify {
        batch_id: String,
        /// Evaluate as of this date instead of the local date.
        #[arg(long)]
        today: Option<String>,
    },
    /// Manage products.
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Manage a product's batches.
    #[command(subcommand)]
    Batches(BatchesCommand),
    /// Validate batch fields without contacting the backend.
    CheckBatch(BatchArgs),
}

#[derive(Debug, Subcommand)]
enum ProductsCommand {
    List,
    Show {
        id: DbId,
    },
    Create(ProductArgs),
    /// Update a product; omitted fields keep their stored values.
    Update {
        id: DbId,
        #[command(flatten)]
        fields: ProductPatchArgs,
    },
    Delete {
        id: DbId,
    },
}

#[derive(Debug, Subcommand)]
enum BatchesCommand {
    List {
        product_id: DbId,
        #[arg(long)]
        today: Option<String>,
    },
    Show {
        product_id: DbId,
        batch_id: String,
        #[arg(long)]
        today: Option<String>,
    },
    Create {
        product_id: DbId,
        #[command(flatten)]
        fields: BatchArgs,
    },
    /// Update a batch; omitted fields keep their stored values.
    Update {
        product_id: DbId,
        batch_id: String,
        #[command(flatten)]
        fields: BatchPatchArgs,
    },
    Delete {
        product_id: DbId,
        batch_id: String,
    },
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    /// Registro sanitario.
    #[arg(long)]
    registro: String,
    /// Image file (JPEG, PNG, GIF or WebP, at most 5 MiB).
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Número de maquilla.
    #[arg(long)]
    numero: String,
    /// Variedad de arroz.
    #[arg(long)]
    variedad: String,
    /// Production date.
    #[arg(long)]
    produccion: String,
    /// Expiration date; must be after the production date.
    #[arg(long)]
    vencimiento: String,
}

#[derive(Debug, Args)]
struct ProductPatchArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    registro: Option<String>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BatchPatchArgs {
    #[arg(long)]
    numero: Option<String>,
    #[arg(long)]
    variedad: Option<String>,
    #[arg(long)]
    produccion: Option<String>,
    #[arg(long)]
    vencimiento: Option<String>,
}

impl ProductArgs {
    fn input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            registro_sanitario: self.registro.clone(),
        }
    }
}

impl BatchArgs {
    fn input(&self) -> BatchInput {
        BatchInput {
            numero_maquilla: self.numero.clone(),
            variedad_arroz: self.variedad.clone(),
            fecha_produccion: self.produccion.clone(),
            fecha_vencimiento: self.vencimiento.clone(),
        }
    }
}

impl ProductPatchArgs {
    /// Stored values overlaid with whatever was passed.
    fn apply(&self, mut input: ProductInput) -> ProductInput {
        if let Some(name) = &self.name {
            input.name = name.clone();
        }
        if let Some(registro) = &self.registro {
            input.registro_sanitario = registro.clone();
        }
        input
    }
}

impl BatchPatchArgs {
    fn apply(&self, mut input: BatchInput) -> BatchInput {
        if let Some(numero) = &self.numero {
            input.numero_maquilla = numero.clone();
        }
        if let Some(variedad) = &self.variedad {
            input.variedad_arroz = variedad.clone();
        }
        if let Some(produccion) = &self.produccion {
            input.fecha_produccion = produccion.clone();
        }
        if let Some(vencimiento) = &self.vencimiento {
            input.fecha_vencimiento = vencimiento.clone();
        }
        input
    }
}

impl Cli {
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        let mut config = ClientConfig::from_env();
        if let Some(api_url) = &self.api_url {
            config = config.with_api_url(api_url);
        }
        tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

        let json = self.json;
        match self.command {
            Commands::CheckBatch(fields) => check_batch(&fields, json),
            Commands::Verify { batch_id, today } => {
                let verifier = Verifier::for_api(CatalogApi::new(&config)?);
                let view = verifier.verify(&batch_id, resolve_today(today)?).await?;
                output::verification(&view, json)
            }
            Commands::Products(command) => run_products(command, &config, json).await,
            Commands::Batches(command) => run_batches(command, &config, json).await,
        }
    }
}

async fn run_products(
    command: ProductsCommand,
    config: &ClientConfig,
    json: bool,
) -> anyhow::Result<()> {
    let api = CatalogApi::new(config)?;
    let urls = config.asset_urls();

    match command {
        ProductsCommand::List => {
            let products = api.list_products().await?;
            let cards: Vec<ProductCardView> = products
                .iter()
                .map(|p| ProductCardView::build(p, &urls))
                .collect();
            output::product_cards(&cards, json)
        }
        ProductsCommand::Show { id } => {
            let product = api.get_product(id).await?;
            output::product_cards(&[ProductCardView::build(&product, &urls)], json)
        }
        ProductsCommand::Create(fields) => {
            let image = read_optional_image(fields.image.as_deref()).await?;
            let product = api.create_product(&fields.input(), image).await?;
            output::product_cards(&[ProductCardView::build(&product, &urls)], json)
        }
        ProductsCommand::Update { id, fields } => {
            let image = read_optional_image(fields.image.as_deref()).await?;
            let existing = api.get_product(id).await?;
            let input = fields.apply(ProductInput::from(&existing));
            let product = api.update_product(&existing, &input, image).await?;
            output::product_cards(&[ProductCardView::build(&product, &urls)], json)
        }
        ProductsCommand::Delete { id } => {
            api.delete_product(id).await?;
            output::deleted("product", &id.to_string(), json)
        }
    }
}

async fn run_batches(
    command: BatchesCommand,
    config: &ClientConfig,
    json: bool,
) -> anyhow::Result<()> {
    let api = CatalogApi::new(config)?;
    let urls = config.asset_urls();

    match command {
        BatchesCommand::List { product_id, today } => {
            let verifier = Verifier::new(api, urls);
            let cards = verifier.batch_cards(product_id, resolve_today(today)?).await?;
            output::batch_cards(&cards, json)
        }
        BatchesCommand::Show {
            product_id,
            batch_id,
            today,
        } => {
            let batch = api.get_batch(product_id, &batch_id).await?;
            let card = BatchCardView::build(&batch, resolve_today(today)?, &urls)
                .map_err(ClientError::from)?;
            output::batch_cards(&[card], json)
        }
        BatchesCommand::Create { product_id, fields } => {
            let batch = api.create_batch(product_id, &fields.input()).await?;
            let card = BatchCardView::build(&batch, batch_status::today(), &urls)
                .map_err(ClientError::from)?;
            output::batch_cards(&[card], json)
        }
        BatchesCommand::Update {
            product_id,
            batch_id,
            fields,
        } => {
            let existing = api.get_batch(product_id, &batch_id).await?;
            let stored = BatchInput::from_batch(&existing).map_err(ClientError::from)?;
            let input = fields.apply(stored);
            let batch = api.update_batch(product_id, &batch_id, &input).await?;
            let card = BatchCardView::build(&batch, batch_status::today(), &urls)
                .map_err(ClientError::from)?;
            output::batch_cards(&[card], json)
        }
        BatchesCommand::Delete {
            product_id,
            batch_id,
        } => {
            api.delete_batch(product_id, &batch_id).await?;
            output::deleted("batch", &batch_id, json)
        }
    }
}

fn check_batch(fields: &BatchArgs, json: bool) -> anyhow::Result<()> {
    match validate_batch(&fields.input()) {
        Ok(batch) => output::accepted_batch(&batch, json),
        Err(errors) => {
            if json {
                output::violations(&errors)?;
            }
            Err(ClientError::from(errors).into())
        }
    }
}

/// `--today` if given, otherwise the local calendar date.
fn resolve_today(today: Option<String>) -> anyhow::Result<NaiveDate> {
    match today {
        Some(value) => {
            parse_date(&value).with_context(|| format!("invalid --today value '{value}'"))
        }
        None => Ok(batch_status::today()),
    }
}

async fn read_optional_image(path: Option<&Path>) -> anyhow::Result<Option<ImageUpload>> {
    match path {
        Some(path) => Ok(Some(read_image(path).await?)),
        None => Ok(None),
    }
}

async fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::from_bytes(file_name, bytes))
}
