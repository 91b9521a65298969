mod display;
mod import;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use crate::display::{display_analysis, display_draws, display_import_summary, display_report};
use loto_analysis::compute_suggestions;
use loto_analysis::config::AnalysisConfig;
use loto_analysis::run_all_passes;
use loto_db::db::{count_draws, db_path, fetch_draw_history, fetch_last_draws, insert_draw, migrate, open_db};
use loto_db::models::{Draw, Pool, validate_draw};

#[derive(Parser)]
#[command(name = "loto", about = "Suggestions de numéros du Loto par analyse de l'historique")]
struct Cli {
    /// Fichier de configuration JSON des analyses
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV (séparateur ';')
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Afficher la configuration effective
    Config,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher le détail des 14 analyses
    Analyze {
        /// Nombre de clés affichées par analyse
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Calculer les numéros suggérés
    Suggest {
        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sortie JSON complète (analyses + suggestion)
        #[arg(long)]
        json: bool,
    },

    /// Ajouter un tirage manuellement
    Add,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AnalysisConfig::load(cli.config.as_deref())?;

    if let Command::Config = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::Config => Ok(()),
        Command::List { last } => cmd_list(&conn, last),
        Command::Analyze { top } => cmd_analyze(&conn, &config, top),
        Command::Suggest { seed, json } => cmd_suggest(&conn, &config, seed, json),
        Command::Add => cmd_add(&conn),
    }
}

fn cmd_import(conn: &loto_db::rusqlite::Connection, file: &Path) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &loto_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : loto import --file <csv>");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_analyze(conn: &loto_db::rusqlite::Connection, config: &AnalysisConfig, top: usize) -> Result<()> {
    let draws = fetch_draw_history(conn)?;
    let passes = run_all_passes(&draws, config)
        .context("Analyse impossible")?;
    display_analysis(&passes, top, draws.len());
    Ok(())
}

fn cmd_suggest(
    conn: &loto_db::rusqlite::Connection,
    config: &AnalysisConfig,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let draws = fetch_draw_history(conn)?;

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let report = compute_suggestions(&draws, config, &mut rng)
        .context("Calcul des suggestions impossible")?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        display_report(&report, config);
    }
    Ok(())
}

fn cmd_add(conn: &loto_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let raw_date = prompt("Date (JJ/MM/AAAA) : ")?;
    let date = import::parse_date(&raw_date)?;

    let main_numbers = prompt_main_numbers()?;
    let lucky_number = prompt_lucky_number()?;

    validate_draw(&main_numbers, lucky_number)?;

    let draw = Draw::new(date, main_numbers, lucky_number);

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            bail!("Un tirage existe déjà pour le {}", draw.date.format("%d/%m/%Y"));
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_main_numbers() -> Result<[u8; 5]> {
    let max = Pool::Main.max();
    loop {
        let input = prompt(&format!("5 numéros (séparés par des espaces, 1-{max}) : "))?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == Pool::Main.pick_count() => {
                let arr = [v[0], v[1], v[2], v[3], v[4]];
                if validate_draw(&arr, 1).is_ok() {
                    return Ok(arr);
                }
                println!("Numéros invalides (1-{max}, pas de doublons). Réessayez.");
            }
            _ => println!("Entrez exactement 5 numéros. Réessayez."),
        }
    }
}

fn prompt_lucky_number() -> Result<u8> {
    let max = Pool::Lucky.max();
    loop {
        let input = prompt(&format!("Numéro chance (1-{max}) : "))?;
        match input.parse::<u8>() {
            Ok(n) if Pool::Lucky.contains(n) => return Ok(n),
            _ => println!("Numéro chance invalide. Réessayez."),
        }
    }
}
