// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use comptoir_app::{DataProvider, Dataset, PageKind, Record};

type Row = &'static [(&'static str, &'static str)];

const PURCHASES: &[Row] = &[
    &[
        ("Date", "2024-05-20"),
        ("Fournisseur", "Sodima SA"),
        ("Total", "1 250 000"),
        ("Statut", "Reçu"),
    ],
    &[
        ("Date", "2024-05-21"),
        ("Fournisseur", "Mali Distribution"),
        ("Total", "450 000"),
        ("Statut", "En commande"),
    ],
];

const ARTICLES: &[Row] = &[
    &[
        ("Code", "RIZ001"),
        ("Nom", "Sac de Riz 50kg"),
        ("Prix", "25 000"),
        ("Stock", "120"),
    ],
    &[
        ("Code", "HUI002"),
        ("Nom", "Huile 5L"),
        ("Prix", "6 500"),
        ("Stock", "45"),
    ],
];

const CLIENTS: &[Row] = &[
    &[
        ("Nom", "Moussa DIARRA"),
        ("Tel", "76 00 11 22"),
        ("Type", "Détaillant"),
        ("Solde", "150 000"),
    ],
    &[
        ("Nom", "Boutique Danaya"),
        ("Tel", "65 44 33 22"),
        ("Type", "Grossiste"),
        ("Solde", "0"),
    ],
];

const SUPPLIERS: &[Row] = &[
    &[
        ("Entreprise", "Mali Distribution"),
        ("Contact", "Sidi KONE"),
        ("Ville", "Bamako"),
    ],
    &[
        ("Entreprise", "Sodima SA"),
        ("Contact", "Fatoumata TRAORE"),
        ("Ville", "Ségou"),
    ],
];

const STOCK_ADJUSTMENTS: &[Row] = &[
    &[
        ("Date", "2024-05-22"),
        ("Article", "HUI002"),
        ("Quantite", "-3"),
        ("Motif", "Bidons endommagés"),
    ],
    &[
        ("Date", "2024-05-23"),
        ("Article", "RIZ001"),
        ("Quantite", "+20"),
        ("Motif", "Réception Sodima SA"),
    ],
];

const WAREHOUSES: &[Row] = &[
    &[
        ("Code", "DEP01"),
        ("Nom", "Dépôt principal"),
        ("Ville", "Bamako"),
        ("Capacite", "2 000"),
    ],
    &[
        ("Code", "DEP02"),
        ("Nom", "Magasin Ségou"),
        ("Ville", "Ségou"),
        ("Capacite", "600"),
    ],
];

/// Built-in demonstration records. Sales start empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl SampleData {
    pub fn new() -> Self {
        Self
    }

    fn rows(kind: PageKind) -> &'static [Row] {
        match kind {
            PageKind::Sales => &[],
            PageKind::Purchases => PURCHASES,
            PageKind::Articles => ARTICLES,
            PageKind::Clients => CLIENTS,
            PageKind::Suppliers => SUPPLIERS,
            PageKind::StockAdjustments => STOCK_ADJUSTMENTS,
            PageKind::Warehouses => WAREHOUSES,
        }
    }
}

impl DataProvider for SampleData {
    fn load_dataset(&mut self, kind: PageKind) -> Result<Dataset> {
        Ok(Self::rows(kind)
            .iter()
            .map(|row| Record::from_pairs(row.iter().copied()))
            .collect())
    }
}
