use espeat_core::{
    Error, Menu, PlatsDuJour, Role, StatutProposition, StatutScan, TicketBalance, TicketKind, User,
};
use espeat_store::{
    MemoryStore, MenuRepository, PropositionRepository, PurchaseRepository, ScanRepository,
    ShareRepository, StoreSnapshot, UserPatch, UserRepository,
};

#[tokio::test]
async fn create_user_rejects_duplicate_email() {
    let store = MemoryStore::avec_seed();
    let avant = store.list_users().await.len();

    let doublon = User::nouveau("Diop", "Autre", "aminata.diop@esp.sn", Role::Etudiant, None);
    let err = store.create_user(doublon).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateEmail(_)));
    assert_eq!(store.list_users().await.len(), avant);
}

#[tokio::test]
async fn update_user_merges_partial_record() {
    let store = MemoryStore::avec_seed();
    let patch = UserPatch {
        prenom: Some("Aminata Bintou".to_string()),
        ..UserPatch::default()
    };
    let apres = store.update_user("etudiant1", patch).await.unwrap();
    assert_eq!(apres.prenom, "Aminata Bintou");
    // untouched fields survive the merge
    assert_eq!(apres.email, "aminata.diop@esp.sn");
    assert_eq!(apres.tickets, Some(TicketBalance::new(5, 3)));
}

#[tokio::test]
async fn purchase_credits_each_type_and_records_amount() {
    let store = MemoryStore::avec_seed();
    let achats_avant = store.achats_de("etudiant1").await.len();

    let (achat, solde) = store
        .enregistrer_achat("etudiant1", 2, 1, espeat_core::MoyenPaiement::Wave)
        .await
        .unwrap();

    assert_eq!(achat.montant, 200);
    assert_eq!(solde, TicketBalance::new(7, 4));
    assert_eq!(store.achats_de("etudiant1").await.len(), achats_avant + 1);
    // the user record reflects the credit
    let user = store.get_user("etudiant1").await.unwrap();
    assert_eq!(user.tickets, Some(TicketBalance::new(7, 4)));
}

#[tokio::test]
async fn transfer_moves_both_balances_and_records_share() {
    let store = MemoryStore::avec_seed();

    let partage = store
        .transferer_tickets("etudiant1", "etudiant2", 2, 1)
        .await
        .unwrap();
    assert_eq!(partage.destinataire_nom, "Moussa Fall");

    let expediteur = store.get_user("etudiant1").await.unwrap();
    let destinataire = store.get_user("etudiant2").await.unwrap();
    assert_eq!(expediteur.tickets, Some(TicketBalance::new(3, 2)));
    assert_eq!(destinataire.tickets, Some(TicketBalance::new(4, 9)));

    let envoyes = store.partages_envoyes_par("etudiant1").await;
    assert!(envoyes.iter().any(|p| p.id == partage.id));
}

#[tokio::test]
async fn transfer_over_balance_mutates_nothing() {
    let store = MemoryStore::avec_seed();

    // etudiant1 has 5 ndekki, ask for 6
    let err = store
        .transferer_tickets("etudiant1", "etudiant2", 6, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientTickets { .. }));

    let expediteur = store.get_user("etudiant1").await.unwrap();
    let destinataire = store.get_user("etudiant2").await.unwrap();
    assert_eq!(expediteur.tickets, Some(TicketBalance::new(5, 3)));
    assert_eq!(destinataire.tickets, Some(TicketBalance::new(2, 8)));
    assert_eq!(store.list_partages().await.len(), 1);
}

#[tokio::test]
async fn transfer_to_staff_is_refused() {
    let store = MemoryStore::avec_seed();
    let err = store
        .transferer_tickets("etudiant1", "gerant1", 1, 0)
        .await
        .unwrap_err();
    assert_eq!(err, Error::NotAStudent);
}

#[tokio::test]
async fn menu_with_empty_dish_list_is_rejected() {
    let store = MemoryStore::avec_seed();
    let avant = store.list_menus().await.len();

    let menu = Menu {
        id: espeat_core::new_id(),
        date: "2025-02-01".parse().unwrap(),
        plats: PlatsDuJour {
            ndekki: vec![],
            repas: vec!["Thiéboudienne".to_string()],
        },
        restaurant_id: "resto1".to_string(),
    };
    let err = store.create_menu(menu).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(store.list_menus().await.len(), avant);
}

#[tokio::test]
async fn menu_update_replaces_date_and_dishes() {
    let store = MemoryStore::avec_seed();
    let plats = PlatsDuJour {
        ndekki: vec!["Pain + café".to_string()],
        repas: vec!["Yassa Poulet".to_string()],
    };
    let menu = store
        .update_menu("menu1", "2025-02-01".parse().unwrap(), plats.clone())
        .await
        .unwrap();
    assert_eq!(menu.plats, plats);
    assert_eq!(menu.date.to_string(), "2025-02-01");
}

#[tokio::test]
async fn proposition_answer_sets_status_and_reply() {
    let store = MemoryStore::avec_seed();
    let reponse = store
        .repondre_proposition(
            "prop1",
            StatutProposition::Refuse,
            Some("Pas cette semaine".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(reponse.statut, StatutProposition::Refuse);
    assert_eq!(reponse.reponse_restaurateur.as_deref(), Some("Pas cette semaine"));
}

#[tokio::test]
async fn scan_debits_one_ticket_when_covered() {
    let store = MemoryStore::avec_seed();

    let scan = store
        .valider_ticket("ESP2023001", TicketKind::Repas, 1)
        .await;
    assert_eq!(scan.statut, StatutScan::Valide);
    assert_eq!(scan.etudiant_nom, "Aminata Diop");

    let user = store.get_user("etudiant1").await.unwrap();
    assert_eq!(user.tickets, Some(TicketBalance::new(5, 2)));

    // newest first
    assert_eq!(store.list_scans().await[0].id, scan.id);
}

#[tokio::test]
async fn scan_of_unknown_number_is_invalid() {
    let store = MemoryStore::avec_seed();
    let scan = store
        .valider_ticket("ESP9999999", TicketKind::Ndekki, 1)
        .await;
    assert_eq!(scan.statut, StatutScan::Invalide);
    assert_eq!(scan.motif_refus.as_deref(), Some("numéro étudiant inconnu"));
}

#[tokio::test]
async fn scan_over_balance_is_invalid_and_keeps_balance() {
    let store = MemoryStore::avec_seed();
    let scan = store
        .valider_ticket("ESP2023001", TicketKind::Repas, 4)
        .await;
    assert_eq!(scan.statut, StatutScan::Invalide);
    let user = store.get_user("etudiant1").await.unwrap();
    assert_eq!(user.tickets, Some(TicketBalance::new(5, 3)));
}

#[tokio::test]
async fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let chemin = dir.path().join("espeat_state.json");

    {
        let store = MemoryStore::ouvrir(&chemin).unwrap();
        store
            .enregistrer_achat("etudiant1", 1, 1, espeat_core::MoyenPaiement::OrangeMoney)
            .await
            .unwrap();
    }

    let relu = MemoryStore::ouvrir(&chemin).unwrap();
    let user = relu.get_user("etudiant1").await.unwrap();
    assert_eq!(user.tickets, Some(TicketBalance::new(6, 4)));
    assert_eq!(relu.list_achats().await.len(), 7);
}

#[tokio::test]
async fn snapshot_blob_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let chemin = dir.path().join("espeat_state.json");
    let store = MemoryStore::ouvrir(&chemin).unwrap();
    store
        .transferer_tickets("etudiant1", "etudiant2", 1, 0)
        .await
        .unwrap();
    drop(store);

    let snapshot = StoreSnapshot::load(&chemin).unwrap();
    assert_eq!(snapshot.partages.len(), 2);
    assert!(snapshot.users.iter().any(|u| u.id == "gerant1"));
}
