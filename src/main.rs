mod cards;
mod sheet;
mod spotify;

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

/// Printable card sheets from a playlist: QR codes on the front, track
/// metadata on a mirrored back for double-sided printing.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download QR codes and metadata for every track of a playlist
    Fetch {
        /// Owner of the playlist
        #[arg(long)]
        user: String,
        /// Exact name of the playlist to look up
        #[arg(long)]
        playlist: String,
        /// Directory the per-track assets are written to
        #[arg(long, default_value = "qr_codes")]
        cards_dir: PathBuf,
        /// API client id (falls back to the SPOTIFY_CLIENT_ID env var)
        #[arg(long)]
        client_id: Option<String>,
        /// API client secret (falls back to the SPOTIFY_CLIENT_SECRET env var)
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Render the double-sided sheet PDFs from downloaded assets
    Render {
        /// Directory holding the per-track assets
        #[arg(long, default_value = "qr_codes")]
        cards_dir: PathBuf,
        /// Directory the two PDFs are written to
        #[arg(long, default_value = "pdf")]
        out_dir: PathBuf,
        /// Folder with background PNGs, cycled across cards
        #[arg(long, default_value = "background")]
        background_dir: PathBuf,
        /// Custom TTF font file, tried before the default candidates
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Fetch {
            user,
            playlist,
            cards_dir,
            client_id,
            client_secret,
        } => fetch(user, playlist, cards_dir, client_id, client_secret).await,
        Commands::Render {
            cards_dir,
            out_dir,
            background_dir,
            font,
        } => sheet::render_sheets(&sheet::RenderOptions {
            cards_dir,
            out_dir,
            background_dir,
            font,
        })
        .map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}

async fn fetch(
    user: String,
    playlist: String,
    cards_dir: PathBuf,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let (id, secret) = spotify::resolve_credentials(client_id, client_secret)?;
    let token = spotify::fetch_access_token(&id, &secret).await?;

    let Some(playlist_id) = spotify::find_playlist_id(&token, &user, &playlist).await? else {
        return Err(format!("Playlist \"{playlist}\" not found for user \"{user}\"").into());
    };
    tracing::debug!(playlist_id = %playlist_id, "resolved playlist");

    let tracks = spotify::fetch_playlist_tracks(&token, &playlist_id).await?;
    println!("\nGenerating QR codes for {} tracks...", tracks.len());

    let written = cards::generate_card_assets(&tracks, &cards_dir)?;
    println!(
        "\nDone! {written} QR codes saved in the {} directory.",
        cards_dir.display()
    );
    Ok(())
}
