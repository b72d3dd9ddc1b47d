#![allow(clippy::doc_markdown)]

use clap::Parser;
use discid::disc::Disc;
use discid::features::{self, FeatureSet};
use discid::{id, DiscIdError};
use env_logger::Env;

/// Compute MusicBrainz and freedb disc IDs from a CD table of contents.
#[derive(Parser)]
struct Args {
    /// TOC string: "first_track last_track leadout offset_1 .. offset_N"
    #[arg(long)]
    toc: Option<String>,

    /// Recover the TOC from a previously generated submission URL
    #[arg(long)]
    url: Option<String>,

    /// Read the TOC from this drive; requires a platform read-toc backend
    #[arg(long)]
    device: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // No drive backend is linked into this binary; only TOC input is available
    features::initialize(FeatureSet::EMPTY);

    let args = Args::parse();

    let toc_string = match (args.toc, args.url, args.device) {
        (Some(toc), None, None) => toc,
        (None, Some(url), None) => id::toc_string_from_url(&url)?,
        (None, None, Some(device)) => {
            log::debug!("Drive read requested for '{device}'");
            if !features::has_feature(features::READ_TOC) {
                return Err(DiscIdError::Unsupported(features::READ_TOC).into());
            }
            anyhow::bail!("no drive backend registered");
        }
        _ => anyhow::bail!("provide exactly one of --toc, --url, or --device"),
    };

    let mut disc = Disc::new();
    disc.parse(&toc_string)?;
    print_disc(&disc);

    Ok(())
}

fn print_disc(disc: &Disc) {
    println!("DiscID      : {disc}");
    println!("FreeDB ID   : {}", disc.freedb_id().unwrap_or_default());
    println!("TOC string  : {}", disc.toc_string().unwrap_or_default());
    println!("First track : {}", disc.first_track().unwrap_or_default());
    println!("Last track  : {}", disc.last_track().unwrap_or_default());
    println!(
        "Total length: {} seconds ({} sectors)",
        disc.seconds().unwrap_or_default(),
        disc.sectors().unwrap_or_default()
    );

    if let Some(url) = disc.submission_url() {
        println!("Submit via  : {url}");
    }

    let Some(tracks) = disc.tracks() else { return };

    println!();
    println!("Track  Start sector  Sectors  Start   Length");
    for track in tracks {
        println!(
            "{:>5}  {:>12}  {:>7}  {:>4}s  {:>5}s",
            track.number,
            track.start_sector,
            track.sectors,
            track.start_time(),
            track.seconds()
        );
    }
}
