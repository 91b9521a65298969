use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub date: NaiveDate,
    pub main_numbers: [u8; 5],
    pub lucky_number: u8,
}

impl Draw {
    pub fn new(date: NaiveDate, main_numbers: [u8; 5], lucky_number: u8) -> Self {
        Self {
            date,
            main_numbers,
            lucky_number,
        }
    }

    /// Les 6 numéros du tirage : les 5 numéros principaux suivis du numéro chance.
    ///
    /// Le numéro chance vient d'une autre urne et peut égaler un numéro
    /// principal : le résultat est alors un multi-ensemble, ce numéro y figure
    /// deux fois.
    pub fn combined_numbers(&self) -> [u8; 6] {
        let m = self.main_numbers;
        [m[0], m[1], m[2], m[3], m[4], self.lucky_number]
    }

    pub fn sorted_main_numbers(&self) -> [u8; 5] {
        let mut sorted = self.main_numbers;
        sorted.sort();
        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Main,
    Lucky,
}

impl Pool {
    pub fn max(&self) -> u8 {
        match self {
            Pool::Main => 49,
            Pool::Lucky => 10,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => 5,
            Pool::Lucky => 1,
        }
    }

    pub fn contains(&self, n: u8) -> bool {
        (1..=self.max()).contains(&n)
    }
}

pub fn validate_draw(main_numbers: &[u8; 5], lucky_number: u8) -> Result<()> {
    for &n in main_numbers {
        if !Pool::Main.contains(n) {
            bail!("Numéro {} hors limites (1-{})", n, Pool::Main.max());
        }
    }
    if !Pool::Lucky.contains(lucky_number) {
        bail!("Numéro chance {} hors limites (1-{})", lucky_number, Pool::Lucky.max());
    }
    for i in 0..main_numbers.len() {
        for j in (i + 1)..main_numbers.len() {
            if main_numbers[i] == main_numbers[j] {
                bail!("Numéro en double : {}", main_numbers[i]);
            }
        }
    }
    Ok(())
}

/// Sépare 6 numéros publiés à la suite en 5 numéros principaux + numéro chance.
///
/// Si une valeur apparaît deux fois, ce doublon est le numéro chance (une seule
/// occurrence est retirée). Sinon le dernier numéro est le numéro chance.
pub fn split_published_numbers(numbers: &[u8]) -> Result<([u8; 5], u8)> {
    if numbers.len() != 6 {
        bail!("Attendu 6 numéros, reçu {}", numbers.len());
    }

    let duplicate = numbers
        .iter()
        .enumerate()
        .find(|&(i, n)| numbers[..i].contains(n))
        .map(|(i, &n)| (i, n));

    let (lucky_idx, lucky) = match duplicate {
        Some(found) => found,
        None => (5, numbers[5]),
    };

    let rest: Vec<u8> = numbers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != lucky_idx)
        .map(|(_, &n)| n)
        .collect();

    let main = [rest[0], rest[1], rest[2], rest[3], rest[4]];
    Ok((main, lucky))
}
