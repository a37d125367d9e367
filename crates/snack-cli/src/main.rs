//! `snack` — command-line client for the Snacktacular API.
//!
//! # Usage
//!
//! ```
//! snack --url http://localhost:5240 --user alice spots
//! snack spot add --name "Cafe A" --address "1 Main St" --lat 10 --lon 20
//! snack review add <spot-id> --title Great --text "Loved it" --rating 5
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client::{ApiClient, ApiConfig, ReviewBody, SpotBody};
use serde::Deserialize;
use snack_core::{review::Review, spot::Spot};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:5240";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "snack", about = "Command-line client for Snacktacular spots and reviews")]
struct Cli {
  /// Path to a TOML config file (url, user).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the server (default: http://localhost:5240).
  #[arg(long, env = "SNACK_URL")]
  url: Option<String>,

  /// User id sent with every request.
  #[arg(long, env = "SNACK_USER")]
  user: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every spot.
  Spots,
  /// Show, add or edit a spot.
  #[command(subcommand)]
  Spot(SpotCommand),
  /// List the reviews of a spot.
  Reviews { spot_id: String },
  /// Add or edit a review.
  #[command(subcommand)]
  Review(ReviewCommand),
}

#[derive(Subcommand, Debug)]
enum SpotCommand {
  Show { id: String },
  Add(SpotFields),
  Edit {
    id:     String,
    #[command(flatten)]
    fields: SpotEdits,
  },
}

#[derive(Args, Debug)]
struct SpotFields {
  #[arg(long, default_value = "")]
  name:    String,
  #[arg(long, default_value = "")]
  address: String,
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  lat:     f64,
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  lon:     f64,
}

/// Only the flags given are changed.
#[derive(Args, Debug)]
struct SpotEdits {
  #[arg(long)]
  name:    Option<String>,
  #[arg(long)]
  address: Option<String>,
  #[arg(long, allow_negative_numbers = true)]
  lat:     Option<f64>,
  #[arg(long, allow_negative_numbers = true)]
  lon:     Option<f64>,
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
  Add {
    spot_id: String,
    #[command(flatten)]
    fields:  ReviewFields,
  },
  Edit {
    spot_id:   String,
    review_id: String,
    #[command(flatten)]
    fields:    ReviewFields,
  },
}

#[derive(Args, Debug)]
struct ReviewFields {
  #[arg(long, default_value = "")]
  title:  String,
  #[arg(long, default_value = "")]
  text:   String,
  /// 1 to 5.
  #[arg(long)]
  rating: i64,
}

impl From<ReviewFields> for ReviewBody {
  fn from(f: ReviewFields) -> Self {
    Self {
      title:  f.title,
      text:   f.text,
      rating: f.rating,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:  String,
  #[serde(default)]
  user: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let file_cfg: ConfigFile = if let Some(path) = &cli.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override the config file.
  let api_config = ApiConfig {
    base_url: cli
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_owned()),
    user_id:  cli.user.unwrap_or(file_cfg.user),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, cli.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Spots => {
      for spot in client.list_spots().await? {
        println!("{}", spot_line(&spot));
      }
    }
    Command::Spot(SpotCommand::Show { id }) => {
      print_spot(&client.get_spot(&id).await?);
    }
    Command::Spot(SpotCommand::Add(fields)) => {
      let body = SpotBody {
        name:      fields.name,
        address:   fields.address,
        latitude:  fields.lat,
        longitude: fields.lon,
      };
      print_spot(&client.create_spot(&body).await?);
    }
    Command::Spot(SpotCommand::Edit { id, fields }) => {
      let current = client.get_spot(&id).await?;
      let mut body = SpotBody::from(&current);
      if let Some(name) = fields.name {
        body.name = name;
      }
      if let Some(address) = fields.address {
        body.address = address;
      }
      if let Some(lat) = fields.lat {
        body.latitude = lat;
      }
      if let Some(lon) = fields.lon {
        body.longitude = lon;
      }
      print_spot(&client.update_spot(&id, &body).await?);
    }
    Command::Reviews { spot_id } => {
      for review in client.list_reviews(&spot_id).await? {
        println!("{}", review_line(&review));
      }
    }
    Command::Review(ReviewCommand::Add { spot_id, fields }) => {
      let review = client.create_review(&spot_id, &fields.into()).await?;
      println!("{}", review_line(&review));
    }
    Command::Review(ReviewCommand::Edit { spot_id, review_id, fields }) => {
      let review = client
        .update_review(&spot_id, &review_id, &fields.into())
        .await?;
      println!("{}", review_line(&review));
    }
  }
  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn spot_line(spot: &Spot) -> String {
  format!("{}\t{}\t{}", spot.document_id, spot.name, spot.address)
}

fn print_spot(spot: &Spot) {
  println!("id:       {}", spot.document_id);
  println!("name:     {}", spot.name);
  println!("address:  {}", spot.address);
  println!(
    "position: {:.5}, {:.5}",
    spot.coordinate.latitude, spot.coordinate.longitude
  );
  println!(
    "rating:   {:.1} ({} reviews)",
    spot.average_rating, spot.number_of_reviews
  );
  println!("owner:    {}", spot.posting_user_id);
}

fn review_line(review: &Review) -> String {
  format!(
    "{}\t{}★\t{}\t{}\t{}",
    review.document_id,
    review.rating,
    review.date.format("%Y-%m-%d"),
    review.title,
    review.text
  )
}
