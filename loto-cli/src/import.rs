use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use loto_db::rusqlite::Connection;
use std::path::Path;
use tracing::warn;

use loto_db::db::insert_draw;
use loto_db::models::{Draw, split_published_numbers, validate_draw};

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))
}

fn parse_number(s: &str) -> Result<u8> {
    let s = s.trim();
    s.parse::<u8>()
        .with_context(|| format!("Impossible de parser le numéro '{}'", s))
}

/// Deux formats de ligne :
/// - `date;n1;n2;n3;n4;n5;chance`
/// - `date;n1 n2 n3 n4 n5 n6` (numéros publiés, chance déduite)
fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let date = parse_date(record.get(0).context("Date manquante")?)?;

    let (main_numbers, lucky_number) = match record.len() {
        7 => {
            let nums = (1..7)
                .map(|idx| parse_number(&record[idx]))
                .collect::<Result<Vec<u8>>>()?;
            ([nums[0], nums[1], nums[2], nums[3], nums[4]], nums[5])
        }
        2 => {
            let nums = record[1]
                .split_whitespace()
                .map(parse_number)
                .collect::<Result<Vec<u8>>>()?;
            split_published_numbers(&nums)?
        }
        n => bail!("Ligne à {} champs (attendu 2 ou 7)", n),
    };

    validate_draw(&main_numbers, lucky_number)?;
    Ok(Draw::new(date, main_numbers, lucky_number))
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records;
        match record_result {
            Ok(record) => {
                match parse_record(&record) {
                    Ok(draw) => {
                        match insert_draw(&tx, &draw) {
                            Ok(true) => result.inserted += 1,
                            Ok(false) => result.skipped += 1,
                            Err(e) => {
                                warn!(line, "Erreur insertion tirage : {e:#}");
                                result.errors += 1;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(line, "Erreur parsing : {e:#}");
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                warn!(line, "Erreur lecture : {e}");
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_db::db::{count_draws, fetch_draw_history, migrate};

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-02").unwrap().to_string(), "2024-03-02");
        assert_eq!(parse_date("17/02/2026").unwrap().to_string(), "2026-02-17");
        assert!(parse_date("2024/13/45").is_err());
    }

    #[test]
    fn test_parse_record_explicit() {
        let draw = parse_record(&record(&["2024-01-06", "5", "12", "23", "34", "45", "7"])).unwrap();
        assert_eq!(draw.main_numbers, [5, 12, 23, 34, 45]);
        assert_eq!(draw.lucky_number, 7);
    }

    #[test]
    fn test_parse_record_published() {
        let draw = parse_record(&record(&["06/01/2024", "5 12 23 34 45 7"])).unwrap();
        assert_eq!(draw.main_numbers, [5, 12, 23, 34, 45]);
        assert_eq!(draw.lucky_number, 7);

        let draw = parse_record(&record(&["2024-01-08", "3 12 23 34 45 3"])).unwrap();
        assert_eq!(draw.main_numbers, [3, 12, 23, 34, 45]);
        assert_eq!(draw.lucky_number, 3);
    }

    #[test]
    fn test_parse_record_invalid() {
        assert!(parse_record(&record(&["2024-01-06", "5", "12"])).is_err());
        assert!(parse_record(&record(&["2024-01-06", "5", "12", "23", "34", "60", "7"])).is_err());
        assert!(parse_record(&record(&["2024-01-06", "5", "12", "23", "34", "45", "11"])).is_err());
    }

    #[test]
    fn test_import_csv_counts() {
        let dir = std::env::temp_dir().join(format!("loto-import-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("draws.csv");
        std::fs::write(
            &path,
            "2024-01-06;5;12;23;34;45;7\n\
             2024-01-08;1 2 3 4 5 6\n\
             2024-01-06;9;10;11;12;13;1\n\
             pas-une-date;1;2;3;4;5;6\n",
        )
        .unwrap();

        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let result = import_csv(&conn, &path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(result.total_records, 4);
        assert_eq!(result.inserted, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors, 1);
        assert_eq!(count_draws(&conn).unwrap(), 2);
        let history = fetch_draw_history(&conn).unwrap();
        assert_eq!(history[1].lucky_number, 6);
    }
}
