//! Seed dataset for the ESP campus: the accounts, restaurants and history
//! the application starts from when no snapshot exists yet.

use chrono::{DateTime, NaiveDate, Utc};

use espeat_core::{
    Horaires, Menu, MenuProposition, MoyenPaiement, PlatsDuJour, Restaurant, Role, StatutProposition,
    StatutScan, TicketBalance, TicketKind, TicketPurchase, TicketShare, User, ValidationScan,
};

use crate::snapshot::StoreSnapshot;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("horodatage seed invalide")
}

fn jour(s: &str) -> NaiveDate {
    s.parse().expect("date seed invalide")
}

fn utilisateur(
    id: &str,
    nom: &str,
    prenom: &str,
    email: &str,
    role: Role,
    numero: Option<&str>,
    tickets: Option<(u32, u32)>,
) -> User {
    User {
        id: id.to_string(),
        nom: nom.to_string(),
        prenom: prenom.to_string(),
        email: email.to_string(),
        role,
        numero_etudiant: numero.map(str::to_string),
        tickets: tickets.map(|(n, r)| TicketBalance::new(n, r)),
    }
}

pub fn donnees_seed() -> StoreSnapshot {
    let users = vec![
        utilisateur(
            "etudiant1",
            "Diop",
            "Aminata",
            "aminata.diop@esp.sn",
            Role::Etudiant,
            Some("ESP2023001"),
            Some((5, 3)),
        ),
        utilisateur(
            "etudiant2",
            "Fall",
            "Moussa",
            "moussa.fall@esp.sn",
            Role::Etudiant,
            Some("ESP2023002"),
            Some((2, 8)),
        ),
        utilisateur(
            "agent1",
            "Ndiaye",
            "Fatou",
            "fatou.ndiaye@esp.sn",
            Role::Agent,
            None,
            None,
        ),
        utilisateur(
            "gerant1",
            "Sarr",
            "Ibrahima",
            "ibrahima.sarr@esp.sn",
            Role::Gerant,
            None,
            None,
        ),
        utilisateur(
            "restaurateur1",
            "Ba",
            "Awa",
            "awa.ba@esp.sn",
            Role::Restaurateur,
            None,
            None,
        ),
    ];

    let horaires = || Horaires {
        matin: "06h-10h".to_string(),
        midi: "12h-14h".to_string(),
        soir: "19h-21h".to_string(),
    };

    let restaurants = vec![
        Restaurant {
            id: "resto1".to_string(),
            nom: "Restaurant ESP".to_string(),
            localisation: "UCAD - École Supérieure Polytechnique".to_string(),
            horaires: horaires(),
        },
        Restaurant {
            id: "resto2".to_string(),
            nom: "Restaurant ENSEPT".to_string(),
            localisation: "UCAD - École Normale Supérieure".to_string(),
            horaires: horaires(),
        },
    ];

    let petit_dejeuner =
        "Pain + Lait + Stick de café + Beurre/Mayonnaise + Fromage/Chocolat".to_string();

    let menus = vec![
        Menu {
            id: "menu1".to_string(),
            date: jour("2025-01-15"),
            plats: PlatsDuJour {
                ndekki: vec![petit_dejeuner.clone()],
                repas: vec![
                    "Thiéboudienne".to_string(),
                    "Yassa Poulet".to_string(),
                    "Mafé Bœuf".to_string(),
                ],
            },
            restaurant_id: "resto1".to_string(),
        },
        Menu {
            id: "menu2".to_string(),
            date: jour("2025-01-15"),
            plats: PlatsDuJour {
                ndekki: vec![petit_dejeuner],
                repas: vec![
                    "Soupou Kanja".to_string(),
                    "Domoda".to_string(),
                    "Caldou Poisson".to_string(),
                ],
            },
            restaurant_id: "resto2".to_string(),
        },
        Menu {
            id: "menu3".to_string(),
            date: jour("2025-01-16"),
            plats: PlatsDuJour {
                ndekki: vec!["Ndekki au poulet, riz parfumé et sauce oignons".to_string()],
                repas: vec![
                    "Thiéboudienne".to_string(),
                    "Mafé de bœuf avec riz blanc".to_string(),
                ],
            },
            restaurant_id: "resto1".to_string(),
        },
    ];

    let propositions = vec![
        MenuProposition {
            id: "prop1".to_string(),
            etudiant_id: "etudiant1".to_string(),
            etudiant_nom: "Aminata Diop".to_string(),
            restaurant_id: "resto1".to_string(),
            type_menu: TicketKind::Repas,
            proposition: "Ajouter du Ngalax comme dessert".to_string(),
            date: jour("2025-01-15"),
            statut: StatutProposition::EnAttente,
            reponse_restaurateur: None,
        },
        MenuProposition {
            id: "prop2".to_string(),
            etudiant_id: "etudiant2".to_string(),
            etudiant_nom: "Moussa Fall".to_string(),
            restaurant_id: "resto1".to_string(),
            type_menu: TicketKind::Ndekki,
            proposition: "Proposer du Thiéré au poisson le vendredi".to_string(),
            date: jour("2025-01-14"),
            statut: StatutProposition::Accepte,
            reponse_restaurateur: Some(
                "Excellente idée ! Nous allons l'intégrer au menu.".to_string(),
            ),
        },
    ];

    let partages = vec![TicketShare {
        id: "share1".to_string(),
        expediteur_id: "etudiant1".to_string(),
        destinataire_id: "etudiant2".to_string(),
        destinataire_nom: "Moussa Fall".to_string(),
        nombre_ndekki: 2,
        nombre_repas: 1,
        date: ts("2025-01-15T12:30:00Z"),
    }];

    // A short purchase history spread over the last months so the
    // statistics page has something real to aggregate.
    let achats = vec![
        achat("achat1", "etudiant1", 10, 5, MoyenPaiement::Wave, "2024-11-04T09:10:00Z"),
        achat("achat2", "etudiant2", 4, 8, MoyenPaiement::OrangeMoney, "2024-11-21T13:05:00Z"),
        achat("achat3", "etudiant1", 6, 2, MoyenPaiement::Wave, "2024-12-02T08:40:00Z"),
        achat("achat4", "etudiant2", 8, 6, MoyenPaiement::Wave, "2024-12-18T12:55:00Z"),
        achat("achat5", "etudiant1", 5, 3, MoyenPaiement::OrangeMoney, "2025-01-10T10:20:00Z"),
        achat("achat6", "etudiant2", 3, 4, MoyenPaiement::Wave, "2025-01-15T08:15:00Z"),
    ];

    let scans = vec![
        scan(
            "scan3",
            "Fatou Sall",
            "ESP2023078",
            TicketKind::Ndekki,
            2,
            StatutScan::Invalide,
            Some("tickets insuffisants"),
            "2025-01-15T12:20:00Z",
        ),
        scan(
            "scan2",
            "Moussa Ndiaye",
            "ESP2023045",
            TicketKind::Repas,
            1,
            StatutScan::Valide,
            None,
            "2025-01-15T12:25:00Z",
        ),
        scan(
            "scan1",
            "Aminata Diop",
            "ESP2023001",
            TicketKind::Ndekki,
            1,
            StatutScan::Valide,
            None,
            "2025-01-15T12:30:00Z",
        ),
    ];

    // history lists are kept newest first
    let mut scans = scans;
    scans.reverse();

    StoreSnapshot {
        users,
        restaurants,
        menus,
        propositions,
        partages,
        achats,
        scans,
    }
}

fn achat(
    id: &str,
    etudiant_id: &str,
    ndekki: u32,
    repas: u32,
    moyen: MoyenPaiement,
    quand: &str,
) -> TicketPurchase {
    TicketPurchase {
        id: id.to_string(),
        etudiant_id: etudiant_id.to_string(),
        nombre_ndekki: ndekki,
        nombre_repas: repas,
        montant: espeat_core::montant_achat(ndekki, repas),
        moyen_paiement: moyen,
        date: ts(quand),
    }
}

#[allow(clippy::too_many_arguments)]
fn scan(
    id: &str,
    nom: &str,
    numero: &str,
    type_ticket: TicketKind,
    nombre: u32,
    statut: StatutScan,
    motif: Option<&str>,
    quand: &str,
) -> ValidationScan {
    ValidationScan {
        id: id.to_string(),
        etudiant_nom: nom.to_string(),
        numero_etudiant: numero.to_string(),
        type_ticket,
        nombre,
        date_heure: ts(quand),
        statut,
        motif_refus: motif.map(str::to_string),
    }
}
