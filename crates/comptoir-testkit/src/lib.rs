// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use comptoir_app::{
    ColumnSpec, CreateRequest, CreateSink, DataProvider, Dataset, PageKind, Record,
};
use std::collections::HashMap;
use std::path::PathBuf;

const PRODUCTS: [&str; 14] = [
    "Sac de Riz 50kg",
    "Huile 5L",
    "Sucre 1kg",
    "Farine 25kg",
    "Lait en poudre 400g",
    "Savon Koto",
    "Thé vert 250g",
    "Pâtes 500g",
    "Sel 1kg",
    "Concentré de tomate",
    "Bougies x6",
    "Allumettes x10",
    "Mil 50kg",
    "Beurre de karité 1kg",
];

const FIRST_NAMES: [&str; 12] = [
    "Moussa", "Awa", "Seydou", "Fatoumata", "Oumar", "Aminata", "Bakary", "Mariam", "Ibrahim",
    "Kadiatou", "Modibo", "Rokia",
];

const LAST_NAMES: [&str; 10] = [
    "DIARRA", "TRAORE", "KONE", "COULIBALY", "KEITA", "SANGARE", "DEMBELE", "TOURE", "CISSE",
    "SIDIBE",
];

const CITIES: [&str; 8] = [
    "Bamako",
    "Ségou",
    "Sikasso",
    "Mopti",
    "Kayes",
    "Koutiala",
    "Gao",
    "Kati",
];

const COMPANY_SUFFIXES: [&str; 5] = ["SA", "SARL", "Distribution", "Négoce", "& Fils"];
const CLIENT_TYPES: [&str; 2] = ["Détaillant", "Grossiste"];
const PURCHASE_STATUSES: [&str; 3] = ["Reçu", "En commande", "Annulé"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible shop records.
#[derive(Debug, Clone)]
pub struct ShopFaker {
    rng: DeterministicRng,
    serial: usize,
}

impl ShopFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            serial: 0,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn article(&mut self) -> Record {
        self.serial += 1;
        let name = self.pick(&PRODUCTS);
        let price = (self.int_n(500) + 1) * 100;
        let stock = self.int_n(300);
        Record::from_pairs([
            ("Code".to_owned(), format!("{}{:03}", code_prefix(name), self.serial)),
            ("Nom".to_owned(), name.to_owned()),
            ("Prix".to_owned(), group_thousands(price as i64)),
            ("Stock".to_owned(), group_thousands(stock as i64)),
        ])
    }

    pub fn client(&mut self) -> Record {
        let name = format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        let phone = format!(
            "{} {:02} {:02} {:02}",
            [65, 66, 70, 76, 79][self.int_n(5)],
            self.int_n(100),
            self.int_n(100),
            self.int_n(100)
        );
        let balance = self.int_n(400) * 500;
        Record::from_pairs([
            ("Nom".to_owned(), name),
            ("Tel".to_owned(), phone),
            ("Type".to_owned(), self.pick(&CLIENT_TYPES).to_owned()),
            ("Solde".to_owned(), group_thousands(balance as i64)),
        ])
    }

    pub fn supplier(&mut self) -> Record {
        let company = format!(
            "{} {}",
            self.pick(&CITIES),
            self.pick(&COMPANY_SUFFIXES)
        );
        let contact = format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        Record::from_pairs([
            ("Entreprise".to_owned(), company),
            ("Contact".to_owned(), contact),
            ("Ville".to_owned(), self.pick(&CITIES).to_owned()),
        ])
    }

    pub fn purchase(&mut self) -> Record {
        let day = self.int_n(28) + 1;
        let total = (self.int_n(2_000) + 10) * 1_000;
        let supplier = self.supplier();
        Record::from_pairs([
            ("Date".to_owned(), format!("2024-05-{day:02}")),
            (
                "Fournisseur".to_owned(),
                supplier.display("Entreprise").to_owned(),
            ),
            ("Total".to_owned(), group_thousands(total as i64)),
            ("Statut".to_owned(), self.pick(&PURCHASE_STATUSES).to_owned()),
        ])
    }

    pub fn articles(&mut self, count: usize) -> Dataset {
        (0..count).map(|_| self.article()).collect()
    }

    pub fn clients(&mut self, count: usize) -> Dataset {
        (0..count).map(|_| self.client()).collect()
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

/// Formats with a space every three digits, the way the shop writes amounts.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn code_prefix(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

pub fn record(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(pairs.iter().copied())
}

pub fn column_spec(keys: &[&str]) -> ColumnSpec {
    ColumnSpec::from_keys(keys)
}

pub fn write_dataset_file(json: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("donnees.json");
    std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub requests: Vec<CreateRequest>,
}

impl CreateSink for RecordingSink {
    fn create_requested(&mut self, request: &CreateRequest) {
        self.requests.push(request.clone());
    }
}

/// Serves fixed datasets per page; any page not set is empty.
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    datasets: HashMap<PageKind, Dataset>,
    failing: Option<PageKind>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: PageKind, rows: Dataset) -> Self {
        self.datasets.insert(kind, rows);
        self
    }

    pub fn failing_on(mut self, kind: PageKind) -> Self {
        self.failing = Some(kind);
        self
    }
}

impl DataProvider for StaticProvider {
    fn load_dataset(&mut self, kind: PageKind) -> Result<Dataset> {
        if self.failing == Some(kind) {
            bail!("static provider told to fail on {}", kind.slug());
        }
        Ok(self.datasets.get(&kind).cloned().unwrap_or_default())
    }
}
