//! Repository layer for ESP'eat.
//!
//! Every entity is reachable through a small async trait with
//! get/list/create/update/delete operations, so the web layer depends on
//! `Arc<dyn Store>` and never on a concrete backend. The only backend here
//! is [`MemoryStore`], an in-memory collection set persisted as a single
//! JSON snapshot blob, which is all the persistence this application wants.

pub mod memory;
pub mod seed;
pub mod snapshot;
pub mod stats;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use espeat_core::{
    Error, Menu, MenuProposition, PlatsDuJour, RapportExport, Restaurant, Role, Statistiques,
    StatutProposition, TicketBalance, TicketKind, TicketPurchase, TicketShare, TopPlat, User,
    ValidationScan, VentesMois,
};

pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;

pub type Result<T> = std::result::Result<T, Error>;

/// Partial user update, merged into the existing record. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub numero_etudiant: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Vec<User>;
    async fn get_user(&self, id: &str) -> Option<User>;
    async fn find_user_by_email(&self, email: &str) -> Option<User>;
    async fn find_user_by_numero(&self, numero: &str) -> Option<User>;
    /// Rejects duplicate emails.
    async fn create_user(&self, user: User) -> Result<User>;
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<User>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn list_restaurants(&self) -> Vec<Restaurant>;
    async fn get_restaurant(&self, id: &str) -> Option<Restaurant>;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn list_menus(&self) -> Vec<Menu>;
    async fn menus_du_restaurant(&self, restaurant_id: &str) -> Vec<Menu>;
    /// Rejects menus with an empty dish list for either ticket type.
    async fn create_menu(&self, menu: Menu) -> Result<Menu>;
    async fn update_menu(
        &self,
        id: &str,
        date: chrono::NaiveDate,
        plats: PlatsDuJour,
    ) -> Result<Menu>;
    async fn delete_menu(&self, id: &str) -> Result<Menu>;
}

#[async_trait]
pub trait PropositionRepository: Send + Sync {
    async fn list_propositions(&self) -> Vec<MenuProposition>;
    async fn propositions_de(&self, etudiant_id: &str) -> Vec<MenuProposition>;
    async fn create_proposition(&self, proposition: MenuProposition) -> Result<MenuProposition>;
    /// Accept or refuse, with the operator's optional reply.
    async fn repondre_proposition(
        &self,
        id: &str,
        statut: StatutProposition,
        reponse: Option<String>,
    ) -> Result<MenuProposition>;
}

#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn list_partages(&self) -> Vec<TicketShare>;
    async fn partages_envoyes_par(&self, user_id: &str) -> Vec<TicketShare>;
    /// Debit the sender, credit the recipient and record the share, all
    /// under one lock. Either everything applies or nothing does.
    async fn transferer_tickets(
        &self,
        expediteur_id: &str,
        destinataire_id: &str,
        ndekki: u32,
        repas: u32,
    ) -> Result<TicketShare>;
}

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn list_achats(&self) -> Vec<TicketPurchase>;
    async fn achats_de(&self, etudiant_id: &str) -> Vec<TicketPurchase>;
    /// Credit the buyer's balance and record the purchase. Returns the
    /// record and the balance after credit.
    async fn enregistrer_achat(
        &self,
        etudiant_id: &str,
        nombre_ndekki: u32,
        nombre_repas: u32,
        moyen_paiement: espeat_core::MoyenPaiement,
    ) -> Result<(TicketPurchase, TicketBalance)>;
}

#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Scan history, newest first.
    async fn list_scans(&self) -> Vec<ValidationScan>;
    /// Check a decoded ticket against the real balances: unknown student
    /// number or insufficient balance records an invalid scan, otherwise
    /// the tickets are debited and the scan is valid.
    async fn valider_ticket(
        &self,
        numero_etudiant: &str,
        type_ticket: TicketKind,
        nombre: u32,
    ) -> ValidationScan;
}

#[async_trait]
pub trait StatsQuery: Send + Sync {
    async fn statistiques(&self, reference: DateTime<Utc>) -> Statistiques;
    async fn ventes_par_mois(&self) -> Vec<VentesMois>;
    async fn top_plats(&self, limite: usize) -> Vec<TopPlat>;
    async fn rapport(&self, periode: &str, reference: DateTime<Utc>) -> RapportExport;
}

/// The full storage surface the application depends on.
pub trait Store:
    UserRepository
    + RestaurantRepository
    + MenuRepository
    + PropositionRepository
    + ShareRepository
    + PurchaseRepository
    + ScanRepository
    + StatsQuery
{
}

impl<T> Store for T where
    T: UserRepository
        + RestaurantRepository
        + MenuRepository
        + PropositionRepository
        + ShareRepository
        + PurchaseRepository
        + ScanRepository
        + StatsQuery
{
}
