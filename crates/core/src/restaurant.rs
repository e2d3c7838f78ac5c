use serde::{Deserialize, Serialize};

/// Service windows, kept as display strings ("06h-10h").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horaires {
    pub matin: String,
    pub midi: String,
    pub soir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub nom: String,
    pub localisation: String,
    pub horaires: Horaires,
}
