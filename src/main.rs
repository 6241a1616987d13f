use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use env_logger::Env;
use log::info;

use skyclock::preferences::{ObservationPosition, PreferenceStore, YamlPreferenceStore};
use skyclock::{BitmapFace, CalendarDate, FaceConfig, HandAngles, SkyClock, TrueTypeFace, Typeface};

#[derive(Debug, Parser)]
#[command(name = "skyclock", about = "Analog sky clock face renderer")]
struct Cli {
    /// TrueType/OpenType font for month names (built-in bitmap face otherwise)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    font: Option<PathBuf>,
    /// Preferences file (defaults to ~/.config/skyclock/preferences.yaml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    preferences: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HemisphereArg {
    Northern,
    Southern,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one frame to a PNG file
    Render {
        /// Date shown as today, YYYY-MM-DD (defaults to the local date)
        #[arg(long, value_parser = parse_date)]
        date: Option<CalendarDate>,
        /// Rotation offset of the date ring, in degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f32,
        /// Overrides the stored hemisphere
        #[arg(long, value_enum)]
        hemisphere: Option<HemisphereArg>,
        /// Draw hands for this time, HH:MM[:SS]
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(short, long, default_value = "skyclock.png", value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Open a window that follows the local date and time
    Show {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f32,
        #[arg(long, value_enum)]
        hemisphere: Option<HemisphereArg>,
    },
    /// Print or update the stored observation position
    Location {
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
        #[arg(long, value_enum)]
        hemisphere: Option<HemisphereArg>,
    },
}

fn parse_date(s: &str) -> std::result::Result<CalendarDate, String> {
    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format!("expected YYYY-MM-DD, got {s:?}"));
    };
    let year = year.parse::<i32>().map_err(|e| e.to_string())?;
    let month = month.parse::<u32>().map_err(|e| e.to_string())?;
    let day = day.parse::<u32>().map_err(|e| e.to_string())?;
    CalendarDate::from_ymd(year, month, day).map_err(|e| e.to_string())
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("{s:?}: {e}"))
}

fn load_typeface(path: Option<&PathBuf>) -> Result<Arc<dyn Typeface>> {
    match path {
        Some(path) => {
            let face = TrueTypeFace::from_file(path)
                .with_context(|| format!("loading font {}", path.display()))?;
            info!("using font {}", path.display());
            Ok(Arc::new(face))
        }
        None => {
            info!("no font given, using the built-in bitmap face");
            Ok(Arc::new(BitmapFace))
        }
    }
}

fn is_southern(arg: Option<HemisphereArg>, stored: &ObservationPosition) -> bool {
    match arg {
        Some(HemisphereArg::Southern) => true,
        Some(HemisphereArg::Northern) => false,
        None => stored.southern_sky,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    let store = cli
        .preferences
        .clone()
        .map(YamlPreferenceStore::new)
        .unwrap_or_else(YamlPreferenceStore::default_location);
    let position = store
        .load()
        .with_context(|| format!("reading {}", store.path().display()))?;

    match cli.command {
        Command::Render {
            date,
            offset,
            hemisphere,
            time,
            output,
        } => {
            let date = date.unwrap_or_else(CalendarDate::today);
            let typeface = load_typeface(cli.font.as_ref())?;
            let mut clock = SkyClock::new(FaceConfig::default(), typeface, date)?;
            clock.set_orientation(offset, is_southern(hemisphere, &position));
            if let Some(time) = time {
                clock.set_hands(HandAngles::from_time(time));
            }
            clock
                .request_draw()
                .save_png(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("rendered {date} to {}", output.display());
        }
        Command::Show { offset, hemisphere } => {
            let typeface = load_typeface(cli.font.as_ref())?;
            let today = CalendarDate::from_naive(Local::now().date_naive());
            let mut clock = SkyClock::new(FaceConfig::default(), typeface, today)?;
            clock.set_orientation(offset, is_southern(hemisphere, &position));
            clock.show("Sky Clock")?;
        }
        Command::Location {
            latitude,
            longitude,
            hemisphere,
        } => {
            if latitude.is_none() && longitude.is_none() && hemisphere.is_none() {
                println!(
                    "latitude: {}\nlongitude: {}\nhemisphere: {:?}",
                    position.latitude,
                    position.longitude,
                    position.hemisphere()
                );
                return Ok(());
            }
            let updated = ObservationPosition::new(
                latitude.unwrap_or(position.latitude),
                longitude.unwrap_or(position.longitude),
                is_southern(hemisphere, &position),
            )?;
            store.save(&updated)?;
        }
    }

    Ok(())
}
