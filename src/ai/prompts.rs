//! Instruction prompts sent ahead of the ad text or the document bytes.

pub const AD_SCORING_PROMPT: &str = r#"Tu es un expert en prospection immobilière. Analyse l'annonce immobilière ci-dessous et évalue l'urgence de vente du propriétaire et l'opportunité pour un agent.

Indices d'urgence : divorce, séparation, succession, mutation, départ à l'étranger, "urgent", "vente rapide", "prix négociable", baisse de prix, travaux à prévoir.
Indices défavorables : "prix ferme", "agences s'abstenir", bien sans défaut apparent.

Réponds UNIQUEMENT avec un objet JSON valide, sans texte autour ni balises markdown, au format exact suivant :
{
  "urgencyScore": <entier de 0 à 100>,
  "urgencyReasoning": "<justification courte, une ou deux phrases>",
  "suggestedOutreach": {
    "sms": "<SMS d'approche court et personnalisé>",
    "emailSubject": "<objet de l'email>",
    "emailBody": "<corps de l'email>"
  },
  "enrichedAddress": {
    "street": "<rue si identifiable, sinon null>",
    "city": "<ville>",
    "postalCode": "<code postal>"
  }
}
Si l'adresse ne peut pas être déduite, omets le champ "enrichedAddress"."#;

pub const DOCUMENT_EXTRACTION_PROMPT: &str = r#"Tu es un assistant spécialisé dans les documents immobiliers français. Identifie le type du document joint et extrais ses informations clés.

Types possibles pour "type" : "DPE", "TITRE_PROPRIETE", "PV_AG", "TAXE_FONCIERE", "FACTURE", "PLAN", "AUTRE".

Réponds UNIQUEMENT avec un objet JSON valide, sans texte autour ni balises markdown, au format suivant (null si l'information est absente) :
{
  "type": "<type du document>",
  "surface": <surface en m² (nombre) ou null>,
  "price": <prix ou montant en euros (nombre) ou null>,
  "energyClass": "<classe énergie A à G ou null>",
  "gesClass": "<classe GES A à G ou null>",
  "address": "<adresse du bien ou null>",
  "ownerName": "<nom du propriétaire ou null>"
}
Tu peux ajouter d'autres champs pertinents (dates, références cadastrales, montants) avec des noms en camelCase."#;

/// Text block describing an ad, sent after [`AD_SCORING_PROMPT`]
pub fn ad_content(title: &str, price: i64, location: &str, description: &str, source_url: &str) -> String {
    format!(
        "Titre: {}\nPrix: {}€\nLocalisation: {}\nDescription: {}\nURL: {}",
        title, price, location, description, source_url
    )
}
