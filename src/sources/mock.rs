use crate::models::PropertyAd;
use crate::sources::traits::AdSource;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

/// Fixed ad feed used until real scrapers exist
#[derive(Debug, Default, Clone, Copy)]
pub struct MockAdSource;

impl MockAdSource {
    pub fn new() -> Self {
        Self
    }

    /// The three seed ads shown on the sniper board
    pub fn seed_ads() -> Vec<PropertyAd> {
        vec![
            PropertyAd {
                id: "1".to_string(),
                source_url: "https://www.leboncoin.fr/ventes_immobilieres/123456789.htm".to_string(),
                source_platform: "leboncoin".to_string(),
                title: "Maison familiale urgente cause divorce".to_string(),
                description: "Vends rapidement maison 120m2, 4 chambres, jardin. Travaux de rafraichissement à prévoir. Prix négociable si vente rapide. Cause séparation. Visites possibles ce week-end.".to_string(),
                price: 280_000,
                location: "Bordeaux (33000)".to_string(),
                published_at: at(2023, 11, 28, 10, 0),
                scraped_at: at(2023, 11, 28, 12, 0),
                images: vec!["https://images.unsplash.com/photo-1564013799919-ab600027ffc6?auto=format&fit=crop&w=800&q=80".to_string()],
                is_analyzed: false,
                analysis: None,
            },
            PropertyAd {
                id: "2".to_string(),
                source_url: "https://www.seloger.com/annonces/achat/appartement/paris-11eme-75/123456.htm".to_string(),
                source_platform: "seloger".to_string(),
                title: "Appartement idéal investisseur".to_string(),
                description: "Studio 25m2 vendu loué. Rentabilité 5%. Quartier recherché. Proche métro. Faibles charges. Idéal premier investissement ou déficit foncier.".to_string(),
                price: 185_000,
                location: "Paris 11ème (75011)".to_string(),
                published_at: at(2023, 11, 27, 14, 30),
                scraped_at: at(2023, 11, 28, 9, 0),
                images: vec!["https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?auto=format&fit=crop&w=800&q=80".to_string()],
                is_analyzed: false,
                analysis: None,
            },
            PropertyAd {
                id: "3".to_string(),
                source_url: "https://www.pap.fr/annonce/vente-maison-lyon-69-g12345".to_string(),
                source_platform: "pap".to_string(),
                title: "Grande maison de caractère".to_string(),
                description: "Belle demeure de 250m2. Prestations haut de gamme. Aucun travaux. Prix ferme. Agences s'abstenir. Curieux s'abstenir.".to_string(),
                price: 850_000,
                location: "Lyon (69006)".to_string(),
                published_at: at(2023, 11, 26, 8, 15),
                scraped_at: at(2023, 11, 28, 11, 0),
                images: vec!["https://images.unsplash.com/photo-1600596542815-2495db9dc2c3?auto=format&fit=crop&w=800&q=80".to_string()],
                is_analyzed: false,
                analysis: None,
            },
        ]
    }
}

#[async_trait]
impl AdSource for MockAdSource {
    async fn fetch_ads(&self) -> Result<Vec<PropertyAd>> {
        let ads = Self::seed_ads();
        info!("📋 Loaded {} mock ads", ads.len());
        Ok(ads)
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
