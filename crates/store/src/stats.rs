//! Aggregation over the recorded purchases, scans and menus. Pure functions
//! on slices; the [`crate::StatsQuery`] impl on the store feeds them the
//! current collections.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use espeat_core::{
    CompteurTickets, Menu, Statistiques, TicketKind, TicketPurchase, TopPlat, ValidationScan,
    VentesMois,
};

const MOIS_ABREGES: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// Revenue for the reference day/month/year plus all-time sold and used
/// ticket counters.
pub fn calcule_statistiques(
    achats: &[TicketPurchase],
    scans: &[ValidationScan],
    reference: DateTime<Utc>,
) -> Statistiques {
    let mut stats = Statistiques::default();

    for achat in achats {
        if achat.date.date_naive() == reference.date_naive() {
            stats.recette_journaliere += achat.montant;
        }
        if achat.date.year() == reference.year() && achat.date.month() == reference.month() {
            stats.recette_mensuelle += achat.montant;
        }
        if achat.date.year() == reference.year() {
            stats.recette_annuelle += achat.montant;
        }
        stats.tickets_vendus.ajouter(TicketKind::Ndekki, achat.nombre_ndekki);
        stats.tickets_vendus.ajouter(TicketKind::Repas, achat.nombre_repas);
    }

    for scan in scans.iter().filter(|s| s.est_valide()) {
        stats.tickets_utilises.ajouter(scan.type_ticket, scan.nombre);
    }

    stats
}

/// Purchases grouped by calendar month, oldest first.
pub fn calcule_ventes_par_mois(achats: &[TicketPurchase]) -> Vec<VentesMois> {
    let mut par_mois: HashMap<(i32, u32), (CompteurTickets, u64)> = HashMap::new();

    for achat in achats {
        let cle = (achat.date.year(), achat.date.month());
        let entree = par_mois.entry(cle).or_default();
        entree.0.ajouter(TicketKind::Ndekki, achat.nombre_ndekki);
        entree.0.ajouter(TicketKind::Repas, achat.nombre_repas);
        entree.1 += achat.montant;
    }

    let mut cles: Vec<_> = par_mois.keys().copied().collect();
    cles.sort();

    cles.into_iter()
        .map(|(annee, mois)| {
            let (compteur, recette) = par_mois[&(annee, mois)];
            VentesMois {
                mois: format!("{} {annee}", MOIS_ABREGES[mois as usize - 1]),
                ndekki: compteur.ndekki,
                repas: compteur.repas,
                recette,
            }
        })
        .collect()
}

/// Dishes ranked by how often the restaurants scheduled them.
pub fn calcule_top_plats(menus: &[Menu], limite: usize) -> Vec<TopPlat> {
    let mut occurrences: HashMap<(&str, TicketKind), u32> = HashMap::new();

    for menu in menus {
        for plat in &menu.plats.ndekki {
            *occurrences.entry((plat.as_str(), TicketKind::Ndekki)).or_default() += 1;
        }
        for plat in &menu.plats.repas {
            *occurrences.entry((plat.as_str(), TicketKind::Repas)).or_default() += 1;
        }
    }

    let mut plats: Vec<TopPlat> = occurrences
        .into_iter()
        .map(|((nom, type_ticket), commandes)| TopPlat {
            nom: nom.to_string(),
            commandes,
            type_ticket,
        })
        .collect();

    // stable order for equal counts so the page doesn't reshuffle
    plats.sort_by(|a, b| b.commandes.cmp(&a.commandes).then_with(|| a.nom.cmp(&b.nom)));
    plats.truncate(limite);
    plats
}

#[cfg(test)]
mod tests {
    use super::*;
    use espeat_core::{MoyenPaiement, PlatsDuJour, StatutScan};

    fn achat(quand: &str, ndekki: u32, repas: u32) -> TicketPurchase {
        TicketPurchase {
            id: espeat_core::new_id(),
            etudiant_id: "etudiant1".into(),
            nombre_ndekki: ndekki,
            nombre_repas: repas,
            montant: espeat_core::montant_achat(ndekki, repas),
            moyen_paiement: MoyenPaiement::Wave,
            date: quand.parse().unwrap(),
        }
    }

    fn scan_valide(kind: TicketKind, nombre: u32) -> ValidationScan {
        ValidationScan {
            id: espeat_core::new_id(),
            etudiant_nom: "Aminata Diop".into(),
            numero_etudiant: "ESP2023001".into(),
            type_ticket: kind,
            nombre,
            date_heure: "2025-01-15T12:00:00Z".parse().unwrap(),
            statut: StatutScan::Valide,
            motif_refus: None,
        }
    }

    #[test]
    fn recettes_split_by_day_month_year() {
        let achats = vec![
            achat("2025-01-15T08:00:00Z", 2, 1), // 200, même jour
            achat("2025-01-03T08:00:00Z", 0, 1), // 100, même mois
            achat("2025-06-20T08:00:00Z", 1, 0), // 50, même année
            achat("2024-12-31T08:00:00Z", 4, 4), // année précédente
        ];
        let stats = calcule_statistiques(&achats, &[], "2025-01-15T18:00:00Z".parse().unwrap());
        assert_eq!(stats.recette_journaliere, 200);
        assert_eq!(stats.recette_mensuelle, 300);
        assert_eq!(stats.recette_annuelle, 350);
        // sold counters are all-time
        assert_eq!(stats.tickets_vendus.ndekki, 7);
        assert_eq!(stats.tickets_vendus.repas, 6);
    }

    #[test]
    fn tickets_utilises_count_only_valid_scans() {
        let mut invalide = scan_valide(TicketKind::Repas, 3);
        invalide.statut = StatutScan::Invalide;
        let scans = vec![scan_valide(TicketKind::Ndekki, 2), invalide];
        let stats = calcule_statistiques(&[], &scans, "2025-01-15T18:00:00Z".parse().unwrap());
        assert_eq!(stats.tickets_utilises.ndekki, 2);
        assert_eq!(stats.tickets_utilises.repas, 0);
    }

    #[test]
    fn ventes_par_mois_groups_and_sorts() {
        let achats = vec![
            achat("2025-01-15T08:00:00Z", 2, 1),
            achat("2024-12-02T08:00:00Z", 1, 1),
            achat("2025-01-03T08:00:00Z", 1, 0),
        ];
        let ventes = calcule_ventes_par_mois(&achats);
        assert_eq!(ventes.len(), 2);
        assert_eq!(ventes[0].mois, "Déc 2024");
        assert_eq!(ventes[1].mois, "Jan 2025");
        assert_eq!(ventes[1].ndekki, 3);
        assert_eq!(ventes[1].repas, 1);
        assert_eq!(ventes[1].recette, 250);
    }

    #[test]
    fn top_plats_ranks_by_occurrences() {
        let menu = |repas: &[&str]| Menu {
            id: espeat_core::new_id(),
            date: "2025-01-15".parse().unwrap(),
            plats: PlatsDuJour {
                ndekki: vec!["Pain + café".into()],
                repas: repas.iter().map(|s| s.to_string()).collect(),
            },
            restaurant_id: "resto1".into(),
        };
        let menus = vec![
            menu(&["Thiéboudienne", "Yassa Poulet"]),
            menu(&["Thiéboudienne"]),
        ];
        let top = calcule_top_plats(&menus, 2);
        assert_eq!(top[0].nom, "Thiéboudienne");
        assert_eq!(top[0].commandes, 2);
        assert_eq!(top.len(), 2);
    }
}
