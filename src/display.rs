use immo_sniper::docu_brain::{DocFile, DocState};
use immo_sniper::sniper::{AdCard, CardPanel};

pub fn print_card(card: &AdCard) {
    println!("[{}] #{} {}", card.platform, card.id, card.title);
    println!("   {} · {}", card.price_label, card.location);
    println!("   {}", card.description);
    match &card.panel {
        CardPanel::Trigger { enabled, label } => {
            let hint = if *enabled {
                format!(" (--analyze {})", card.id)
            } else {
                String::new()
            };
            println!("   ⚡ {}{}", label, hint);
        }
        CardPanel::Analysis { score, band, reasoning, sms } => {
            println!("   Score Sniper: {}/100 ({})", score, band);
            println!("   Analyse: {}", reasoning);
            if !sms.is_empty() {
                println!("   SMS suggéré: \"{}\"", sms);
            }
        }
    }
    println!();
}

pub fn print_document(doc: &DocFile) {
    println!("{} [{}]", doc.name, doc.state);
    println!("   Aperçu: {}", doc.preview);
    match &doc.state {
        DocState::Done { data } => {
            println!("   Type: {}", data.document_type);
            if let Some(surface) = data.surface {
                println!("   Surface: {} m²", surface);
            }
            if let Some(price) = data.price {
                println!("   Prix: {} €", price);
            }
            if let Some(class) = &data.energy_class {
                println!("   Classe énergie: {}", class);
            }
            if let Some(class) = &data.ges_class {
                println!("   Classe GES: {}", class);
            }
            if let Some(address) = &data.address {
                println!("   Adresse: {}", address);
            }
            if let Some(owner) = &data.owner_name {
                println!("   Propriétaire: {}", owner);
            }
            for (key, value) in &data.extra {
                println!("   {}: {}", key, value);
            }
            if let Some(name) = doc.suggested_file_name() {
                println!("   Nom suggéré: {}", name);
            }
        }
        DocState::Error => println!("   Erreur"),
        _ => {}
    }
    println!();
}
