//! In-memory store backing every repository trait, with best-effort JSON
//! snapshot persistence. Mutations take the write lock, apply in place and
//! rewrite the snapshot before releasing it, so no reader ever observes a
//! half-applied transfer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use espeat_core::{
    Error, Menu, MenuProposition, MoyenPaiement, PlatsDuJour, RapportExport, Restaurant,
    Statistiques, StatutProposition, StatutScan, TicketBalance, TicketKind, TicketPurchase,
    TicketShare, TopPlat, User, ValidationScan, VentesMois,
};

use crate::snapshot::StoreSnapshot;
use crate::{
    MenuRepository, PropositionRepository, PurchaseRepository, RestaurantRepository, Result,
    ScanRepository, ShareRepository, StatsQuery, UserPatch, UserRepository, seed, stats,
};

pub struct MemoryStore {
    inner: RwLock<StoreSnapshot>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Empty store, no persistence. Used by tests that build their own data.
    pub fn vide() -> Self {
        MemoryStore {
            inner: RwLock::new(StoreSnapshot::default()),
            snapshot_path: None,
        }
    }

    /// Seeded store, no persistence.
    pub fn avec_seed() -> Self {
        MemoryStore {
            inner: RwLock::new(seed::donnees_seed()),
            snapshot_path: None,
        }
    }

    /// Load the snapshot at `path`, seeding it first when absent. Every
    /// later mutation rewrites the blob.
    pub fn ouvrir(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let donnees = if path.exists() {
            StoreSnapshot::load(&path)?
        } else {
            let seed = seed::donnees_seed();
            seed.save(&path)?;
            seed
        };
        Ok(MemoryStore {
            inner: RwLock::new(donnees),
            snapshot_path: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Best effort, like the browser storage it stands in for: a failed
    /// write is logged, never fatal.
    fn persist(&self, donnees: &StoreSnapshot) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        if let Err(err) = donnees.save(path) {
            warn!(chemin = %path.display(), erreur = %err, "échec d'écriture du snapshot");
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    async fn get_user(&self, id: &str) -> Option<User> {
        self.inner.read().await.users.iter().find(|u| u.id == id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn find_user_by_numero(&self, numero: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.numero_etudiant.as_deref() == Some(numero))
            .cloned()
    }

    async fn create_user(&self, user: User) -> Result<User> {
        let mut donnees = self.inner.write().await;
        if donnees.users.iter().any(|u| u.email == user.email) {
            return Err(Error::DuplicateEmail(user.email));
        }
        debug!(user_id = %user.id, email = %user.email, "création d'un utilisateur");
        donnees.users.push(user.clone());
        self.persist(&donnees);
        Ok(user)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User> {
        let mut donnees = self.inner.write().await;
        if let Some(email) = &patch.email
            && donnees.users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(Error::DuplicateEmail(email.clone()));
        }
        let user = donnees
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::UserNotFound(id.to_string()))?;

        if let Some(nom) = patch.nom {
            user.nom = nom;
        }
        if let Some(prenom) = patch.prenom {
            user.prenom = prenom;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
            // a balance only makes sense for students
            match (role.is_etudiant(), user.tickets) {
                (true, None) => user.tickets = Some(TicketBalance::default()),
                (false, Some(_)) => user.tickets = None,
                _ => {}
            }
        }
        if let Some(numero) = patch.numero_etudiant {
            user.numero_etudiant = (!numero.is_empty()).then_some(numero);
        }

        let user = user.clone();
        self.persist(&donnees);
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<User> {
        let mut donnees = self.inner.write().await;
        let position = donnees
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| Error::UserNotFound(id.to_string()))?;
        let supprime = donnees.users.remove(position);
        debug!(user_id = %supprime.id, "suppression d'un utilisateur");
        self.persist(&donnees);
        Ok(supprime)
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    async fn list_restaurants(&self) -> Vec<Restaurant> {
        self.inner.read().await.restaurants.clone()
    }

    async fn get_restaurant(&self, id: &str) -> Option<Restaurant> {
        self.inner
            .read()
            .await
            .restaurants
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

fn valider_plats(plats: &PlatsDuJour) -> Result<()> {
    let vide = |liste: &[String]| liste.iter().all(|p| p.trim().is_empty());
    if plats.ndekki.is_empty() || vide(&plats.ndekki) {
        return Err(Error::Validation(
            "le menu ndekki est obligatoire".to_string(),
        ));
    }
    if plats.repas.is_empty() || vide(&plats.repas) {
        return Err(Error::Validation(
            "le menu repas est obligatoire".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn list_menus(&self) -> Vec<Menu> {
        self.inner.read().await.menus.clone()
    }

    async fn menus_du_restaurant(&self, restaurant_id: &str) -> Vec<Menu> {
        self.inner
            .read()
            .await
            .menus
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect()
    }

    async fn create_menu(&self, menu: Menu) -> Result<Menu> {
        valider_plats(&menu.plats)?;
        let mut donnees = self.inner.write().await;
        if !donnees.restaurants.iter().any(|r| r.id == menu.restaurant_id) {
            return Err(Error::RestaurantNotFound(menu.restaurant_id));
        }
        donnees.menus.push(menu.clone());
        self.persist(&donnees);
        Ok(menu)
    }

    async fn update_menu(&self, id: &str, date: NaiveDate, plats: PlatsDuJour) -> Result<Menu> {
        valider_plats(&plats)?;
        let mut donnees = self.inner.write().await;
        let menu = donnees
            .menus
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::MenuNotFound(id.to_string()))?;
        menu.date = date;
        menu.plats = plats;
        let menu = menu.clone();
        self.persist(&donnees);
        Ok(menu)
    }

    async fn delete_menu(&self, id: &str) -> Result<Menu> {
        let mut donnees = self.inner.write().await;
        let position = donnees
            .menus
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::MenuNotFound(id.to_string()))?;
        let supprime = donnees.menus.remove(position);
        self.persist(&donnees);
        Ok(supprime)
    }
}

#[async_trait]
impl PropositionRepository for MemoryStore {
    async fn list_propositions(&self) -> Vec<MenuProposition> {
        self.inner.read().await.propositions.clone()
    }

    async fn propositions_de(&self, etudiant_id: &str) -> Vec<MenuProposition> {
        self.inner
            .read()
            .await
            .propositions
            .iter()
            .filter(|p| p.etudiant_id == etudiant_id)
            .cloned()
            .collect()
    }

    async fn create_proposition(&self, proposition: MenuProposition) -> Result<MenuProposition> {
        if proposition.proposition.trim().is_empty() {
            return Err(Error::Validation(
                "la proposition ne peut pas être vide".to_string(),
            ));
        }
        let mut donnees = self.inner.write().await;
        if !donnees
            .restaurants
            .iter()
            .any(|r| r.id == proposition.restaurant_id)
        {
            return Err(Error::RestaurantNotFound(proposition.restaurant_id));
        }
        donnees.propositions.push(proposition.clone());
        self.persist(&donnees);
        Ok(proposition)
    }

    async fn repondre_proposition(
        &self,
        id: &str,
        statut: StatutProposition,
        reponse: Option<String>,
    ) -> Result<MenuProposition> {
        let mut donnees = self.inner.write().await;
        let proposition = donnees
            .propositions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::PropositionNotFound(id.to_string()))?;
        proposition.statut = statut;
        proposition.reponse_restaurateur = reponse;
        let proposition = proposition.clone();
        self.persist(&donnees);
        Ok(proposition)
    }
}

#[async_trait]
impl ShareRepository for MemoryStore {
    async fn list_partages(&self) -> Vec<TicketShare> {
        self.inner.read().await.partages.clone()
    }

    async fn partages_envoyes_par(&self, user_id: &str) -> Vec<TicketShare> {
        self.inner
            .read()
            .await
            .partages
            .iter()
            .filter(|p| p.expediteur_id == user_id)
            .cloned()
            .collect()
    }

    async fn transferer_tickets(
        &self,
        expediteur_id: &str,
        destinataire_id: &str,
        ndekki: u32,
        repas: u32,
    ) -> Result<TicketShare> {
        if ndekki + repas == 0 {
            return Err(Error::Validation(
                "sélectionner au moins un ticket à partager".to_string(),
            ));
        }
        if expediteur_id == destinataire_id {
            return Err(Error::Validation(
                "impossible de se partager des tickets à soi-même".to_string(),
            ));
        }

        let mut donnees = self.inner.write().await;

        let expediteur = donnees
            .users
            .iter()
            .find(|u| u.id == expediteur_id)
            .ok_or_else(|| Error::UserNotFound(expediteur_id.to_string()))?;
        let mut solde_expediteur = expediteur.tickets.ok_or(Error::NotAStudent)?;

        let destinataire = donnees
            .users
            .iter()
            .find(|u| u.id == destinataire_id)
            .ok_or_else(|| Error::UserNotFound(destinataire_id.to_string()))?;
        let mut solde_destinataire = destinataire.tickets.ok_or(Error::NotAStudent)?;
        let destinataire_nom = destinataire.nom_complet();

        // validated before any write, then both sides move together
        solde_expediteur.debiter(ndekki, repas)?;
        solde_destinataire.crediter(ndekki, repas);

        for user in donnees.users.iter_mut() {
            if user.id == expediteur_id {
                user.tickets = Some(solde_expediteur);
            } else if user.id == destinataire_id {
                user.tickets = Some(solde_destinataire);
            }
        }

        let partage = TicketShare {
            id: espeat_core::new_id(),
            expediteur_id: expediteur_id.to_string(),
            destinataire_id: destinataire_id.to_string(),
            destinataire_nom,
            nombre_ndekki: ndekki,
            nombre_repas: repas,
            date: Utc::now(),
        };
        donnees.partages.push(partage.clone());

        debug!(
            expediteur = %expediteur_id,
            destinataire = %destinataire_id,
            ndekki,
            repas,
            "transfert de tickets"
        );
        self.persist(&donnees);
        Ok(partage)
    }
}

#[async_trait]
impl PurchaseRepository for MemoryStore {
    async fn list_achats(&self) -> Vec<TicketPurchase> {
        self.inner.read().await.achats.clone()
    }

    async fn achats_de(&self, etudiant_id: &str) -> Vec<TicketPurchase> {
        self.inner
            .read()
            .await
            .achats
            .iter()
            .filter(|a| a.etudiant_id == etudiant_id)
            .cloned()
            .collect()
    }

    async fn enregistrer_achat(
        &self,
        etudiant_id: &str,
        nombre_ndekki: u32,
        nombre_repas: u32,
        moyen_paiement: MoyenPaiement,
    ) -> Result<(TicketPurchase, TicketBalance)> {
        if nombre_ndekki + nombre_repas == 0 {
            return Err(Error::Validation(
                "sélectionner au moins un ticket à acheter".to_string(),
            ));
        }

        let mut donnees = self.inner.write().await;
        let user = donnees
            .users
            .iter_mut()
            .find(|u| u.id == etudiant_id)
            .ok_or_else(|| Error::UserNotFound(etudiant_id.to_string()))?;
        let solde = user.tickets.as_mut().ok_or(Error::NotAStudent)?;
        solde.crediter(nombre_ndekki, nombre_repas);
        let solde = *solde;

        let achat = TicketPurchase {
            id: espeat_core::new_id(),
            etudiant_id: etudiant_id.to_string(),
            nombre_ndekki,
            nombre_repas,
            montant: espeat_core::montant_achat(nombre_ndekki, nombre_repas),
            moyen_paiement,
            date: Utc::now(),
        };
        donnees.achats.push(achat.clone());

        debug!(etudiant = %etudiant_id, montant = achat.montant, "achat de tickets");
        self.persist(&donnees);
        Ok((achat, solde))
    }
}

#[async_trait]
impl ScanRepository for MemoryStore {
    async fn list_scans(&self) -> Vec<ValidationScan> {
        self.inner.read().await.scans.clone()
    }

    async fn valider_ticket(
        &self,
        numero_etudiant: &str,
        type_ticket: TicketKind,
        nombre: u32,
    ) -> ValidationScan {
        let mut donnees = self.inner.write().await;

        let resultat = donnees
            .users
            .iter_mut()
            .find(|u| u.numero_etudiant.as_deref() == Some(numero_etudiant));

        let (etudiant_nom, statut, motif) = match resultat {
            None => (
                "Étudiant inconnu".to_string(),
                StatutScan::Invalide,
                Some("numéro étudiant inconnu".to_string()),
            ),
            Some(user) => {
                let nom = user.nom_complet();
                let debit = match user.tickets.as_mut() {
                    Some(solde) => match type_ticket {
                        TicketKind::Ndekki => solde.debiter(nombre, 0),
                        TicketKind::Repas => solde.debiter(0, nombre),
                    },
                    None => Err(Error::NotAStudent),
                };
                match debit {
                    Ok(()) => (nom, StatutScan::Valide, None),
                    Err(_) => (
                        nom,
                        StatutScan::Invalide,
                        Some("tickets insuffisants".to_string()),
                    ),
                }
            }
        };

        let scan = ValidationScan {
            id: espeat_core::new_id(),
            etudiant_nom,
            numero_etudiant: numero_etudiant.to_string(),
            type_ticket,
            nombre,
            date_heure: Utc::now(),
            statut,
            motif_refus: motif,
        };

        // history reads newest first
        donnees.scans.insert(0, scan.clone());
        self.persist(&donnees);
        scan
    }
}

#[async_trait]
impl StatsQuery for MemoryStore {
    async fn statistiques(&self, reference: DateTime<Utc>) -> Statistiques {
        let donnees = self.inner.read().await;
        stats::calcule_statistiques(&donnees.achats, &donnees.scans, reference)
    }

    async fn ventes_par_mois(&self) -> Vec<VentesMois> {
        let donnees = self.inner.read().await;
        stats::calcule_ventes_par_mois(&donnees.achats)
    }

    async fn top_plats(&self, limite: usize) -> Vec<TopPlat> {
        let donnees = self.inner.read().await;
        stats::calcule_top_plats(&donnees.menus, limite)
    }

    async fn rapport(&self, periode: &str, reference: DateTime<Utc>) -> RapportExport {
        let donnees = self.inner.read().await;
        RapportExport {
            periode: periode.to_string(),
            date: reference,
            statistiques: stats::calcule_statistiques(&donnees.achats, &donnees.scans, reference),
            ventes_par_mois: stats::calcule_ventes_par_mois(&donnees.achats),
            top_plats: stats::calcule_top_plats(&donnees.menus, 5),
        }
    }
}
