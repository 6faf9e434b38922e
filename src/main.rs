use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use titan_imagegen::{
    logger::{self, LoggerConfig},
    output::{read_image, timestamped_output_path},
    BedrockClient, BedrockConfig, ImageClient, ImageGenerationConfig, ImageGenerationResponse,
    OutpaintingMode, TaskType,
};

const DEMO_PROMPT: &str = "A serene mountain landscape at sunset with a lake in the foreground";
const DEMO_SEED: u32 = 42;

#[derive(Parser)]
#[command(name = "titan-imagegen")]
#[command(about = "Generate and edit images with Amazon Titan Image Generator on Bedrock")]
#[command(version)]
struct Cli {
    /// Scenario to run; defaults to the text-to-image demo
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    generation: GenerationArgs,

    /// Directory for timestamped output files
    #[arg(long, global = true, default_value = "./output")]
    output_dir: PathBuf,

    /// Exact output file; overrides --output-dir
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// AWS region; falls back to AWS_REGION, then us-east-1
    #[arg(long, global = true)]
    region: Option<String>,

    /// Bedrock model id
    #[arg(long, global = true)]
    model: Option<String>,
}

impl Cli {
    /// Layers `--region` and `--model` over the environment config, only when given.
    fn bedrock_config(&self, mut config: BedrockConfig) -> BedrockConfig {
        if let Some(region) = &self.region {
            config = config.with_region(region);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        config
    }
}

#[derive(Args)]
struct GenerationArgs {
    /// Number of images to request
    #[arg(long, global = true, default_value_t = 1)]
    count: u32,

    #[arg(long, global = true, default_value_t = 1024)]
    width: u32,

    #[arg(long, global = true, default_value_t = 1024)]
    height: u32,

    /// Guidance scale
    #[arg(long, global = true, default_value_t = 8.0)]
    cfg_scale: f32,

    /// Seed for deterministic generation
    #[arg(long, global = true)]
    seed: Option<u32>,

    /// What the image should not contain
    #[arg(long, global = true)]
    negative: Option<String>,
}

impl GenerationArgs {
    fn to_config(&self) -> ImageGenerationConfig {
        let mut config = ImageGenerationConfig::new()
            .with_number_of_images(self.count)
            .with_size(self.width, self.height)
            .with_cfg_scale(self.cfg_scale);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(negative) = &self.negative {
            config = config.with_negative_text(negative);
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate an image from a text prompt
    Text {
        #[arg(default_value = DEMO_PROMPT)]
        prompt: String,
    },

    /// Regenerate the masked region of an image
    Inpaint {
        prompt: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        mask: PathBuf,
    },

    /// Create a variation of one or more reference images
    Vary {
        prompt: String,
        /// Reference image; repeat for several
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
    },

    /// Extend an image beyond its borders
    Outpaint {
        prompt: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        mask: PathBuf,
        /// Use PRECISE instead of DEFAULT outpainting mode
        #[arg(long)]
        precise: bool,
    },
}

impl Command {
    fn demo() -> Self {
        Command::Text {
            prompt: DEMO_PROMPT.to_string(),
        }
    }

    fn task_type(&self) -> TaskType {
        match self {
            Command::Text { .. } => TaskType::TextImage,
            Command::Inpaint { .. } => TaskType::Inpainting,
            Command::Vary { .. } => TaskType::ImageVariation,
            Command::Outpaint { .. } => TaskType::Outpainting,
        }
    }

    async fn run(
        self,
        client: &ImageClient,
        config: ImageGenerationConfig,
    ) -> titan_imagegen::Result<ImageGenerationResponse> {
        match self {
            Command::Text { prompt } => client.generate_from_text(&prompt, &config).await,
            Command::Inpaint {
                prompt,
                image,
                mask,
            } => {
                let source = read_image(&image).await?;
                let mask = read_image(&mask).await?;
                client.edit_with_mask(source, mask, &prompt, &config).await
            }
            Command::Vary { prompt, images } => {
                let mut sources = Vec::with_capacity(images.len());
                for path in &images {
                    sources.push(read_image(path).await?);
                }
                client.create_variation(sources, &prompt, &config).await
            }
            Command::Outpaint {
                prompt,
                image,
                mask,
                precise,
            } => {
                let mode = if precise {
                    OutpaintingMode::Precise
                } else {
                    OutpaintingMode::Default
                };
                let source = read_image(&image).await?;
                let mask = read_image(&mask).await?;
                client
                    .extend_image(source, mask, &prompt, &config.with_outpainting_mode(mode))
                    .await
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let cli = Cli::parse();

    let bedrock_config = cli.bedrock_config(BedrockConfig::from_env());
    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &bedrock_config,
    );

    log::debug!("🖼️  Available image generation models:");
    for (id, name, provider) in ImageClient::supported_models() {
        log::debug!("  {} - {} ({})", id, name, provider);
    }

    let client = match BedrockClient::new(bedrock_config).await {
        Ok(client) => {
            log::info!("✅ Bedrock client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Bedrock client: {}", e);
            return Err(e.into());
        }
    };

    let mut config = cli.generation.to_config();
    let command = match cli.command {
        Some(command) => command,
        None => {
            if config.seed.is_none() {
                config = config.with_seed(DEMO_SEED);
            }
            Command::demo()
        }
    };

    let task = command.task_type();
    let output_path = cli
        .output
        .unwrap_or_else(|| timestamped_output_path(&cli.output_dir, task, Utc::now()));

    log::info!("🎨 Running {} scenario...", task.slug());
    let response = command.run(client.image(), config).await?;

    if response.images.len() > 1 {
        log::info!(
            "Service returned {} images, keeping the first",
            response.images.len()
        );
    }

    match response.save_first(&output_path).await? {
        Some(path) => log::info!("✅ {} finished: {}", task.slug(), path.display()),
        None => log::warn!("⚠️  {} produced no image, nothing written", task.slug()),
    }

    Ok(())
}
