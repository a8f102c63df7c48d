// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{AlertRule, Column, ColumnSpec};

pub const DEFAULT_STOCK_THRESHOLD: i64 = 50;
pub const STOCK_COLUMN: &str = "Stock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Sales,
    Purchases,
    Articles,
    Clients,
    Suppliers,
    StockAdjustments,
    Warehouses,
}

impl PageKind {
    pub const ALL: [Self; 7] = [
        Self::Sales,
        Self::Purchases,
        Self::Articles,
        Self::Clients,
        Self::Suppliers,
        Self::StockAdjustments,
        Self::Warehouses,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Sales => "ventes",
            Self::Purchases => "achats",
            Self::Articles => "articles",
            Self::Clients => "clients",
            Self::Suppliers => "fournisseurs",
            Self::StockAdjustments => "ajustements",
            Self::Warehouses => "entrepots",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ventes" => Some(Self::Sales),
            "achats" => Some(Self::Purchases),
            "articles" => Some(Self::Articles),
            "clients" => Some(Self::Clients),
            "fournisseurs" => Some(Self::Suppliers),
            "ajustements" => Some(Self::StockAdjustments),
            "entrepots" => Some(Self::Warehouses),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Ventes",
            Self::Purchases => "Achats",
            Self::Articles => "Articles",
            Self::Clients => "Clients",
            Self::Suppliers => "Fournisseurs",
            Self::StockAdjustments => "Ajustements",
            Self::Warehouses => "Entrepôts",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Sales => "Gestion des Ventes",
            Self::Purchases => "Gestion des Achats",
            Self::Articles => "Catalogue Articles",
            Self::Clients => "Répertoire Clients",
            Self::Suppliers => "Registre Fournisseurs",
            Self::StockAdjustments => "Ajustements de Stock",
            Self::Warehouses => "Entrepôts",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Sales => "🛒",
            Self::Purchases => "🚚",
            Self::Articles => "📦",
            Self::Clients => "👥",
            Self::Suppliers => "📇",
            Self::StockAdjustments => "⚖",
            Self::Warehouses => "🏬",
        }
    }

    pub const fn accent(self) -> &'static str {
        match self {
            Self::Sales => "#3498db",
            Self::Purchases => "#8e44ad",
            Self::Articles => "#27ae60",
            Self::Clients => "#e67e22",
            Self::Suppliers => "#16a085",
            Self::StockAdjustments => "#c0392b",
            Self::Warehouses => "#7f8c8d",
        }
    }

    pub fn columns(self) -> ColumnSpec {
        let pairs: &[(&str, &str)] = match self {
            Self::Sales => &[
                ("Facture", "Facture"),
                ("Client", "Client"),
                ("Montant", "Montant"),
                ("Date", "Date"),
            ],
            Self::Purchases => &[
                ("Date", "Date"),
                ("Fournisseur", "Fournisseur"),
                ("Total", "Total"),
                ("Statut", "Statut"),
            ],
            Self::Articles => &[
                ("Code", "Code"),
                ("Nom", "Nom"),
                ("Prix", "Prix"),
                (STOCK_COLUMN, "Stock"),
            ],
            Self::Clients => &[
                ("Nom", "Nom"),
                ("Tel", "Tel"),
                ("Type", "Type"),
                ("Solde", "Solde"),
            ],
            Self::Suppliers => &[
                ("Entreprise", "Entreprise"),
                ("Contact", "Contact"),
                ("Ville", "Ville"),
            ],
            Self::StockAdjustments => &[
                ("Date", "Date"),
                ("Article", "Article"),
                ("Quantite", "Quantité"),
                ("Motif", "Motif"),
            ],
            Self::Warehouses => &[
                ("Code", "Code"),
                ("Nom", "Nom"),
                ("Ville", "Ville"),
                ("Capacite", "Capacité"),
            ],
        };
        ColumnSpec::new(
            pairs
                .iter()
                .map(|(key, label)| Column::new(*key, *label))
                .collect(),
        )
    }

    pub fn alert_rule(self, stock_threshold: i64) -> Option<AlertRule> {
        match self {
            Self::Articles => Some(AlertRule::below(STOCK_COLUMN, stock_threshold)),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0)
    }
}
