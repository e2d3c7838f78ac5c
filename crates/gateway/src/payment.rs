//! Mobile-money payment simulation (Wave / Orange Money).

use std::time::Duration;

use async_trait::async_trait;
use rand::RngExt;
use serde::Deserialize;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::{GatewayError, PaymentGateway, PaymentReceipt, PaymentRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Simulated operator latency per attempt.
    #[serde(default = "default_delai_ms")]
    pub delai_ms: u64,
    /// Probability in [0, 1] that an attempt is declined. The campus demo
    /// runs at 0: once the form validates, payment goes through.
    #[serde(default)]
    pub taux_echec: f64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_tentatives_max")]
    pub tentatives_max: u32,
}

fn default_delai_ms() -> u64 {
    2000
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_tentatives_max() -> u32 {
    3
}

impl Default for PaymentConfig {
    fn default() -> Self {
        PaymentConfig {
            delai_ms: default_delai_ms(),
            taux_echec: 0.0,
            timeout_ms: default_timeout_ms(),
            tentatives_max: default_tentatives_max(),
        }
    }
}

pub struct MobileMoneyGateway {
    config: PaymentConfig,
}

impl MobileMoneyGateway {
    pub fn new(config: PaymentConfig) -> Self {
        MobileMoneyGateway {
            config: PaymentConfig {
                taux_echec: config.taux_echec.clamp(0.0, 1.0),
                ..config
            },
        }
    }

    /// One simulated exchange with the operator.
    async fn tenter(&self, demande: &PaymentRequest) -> Result<PaymentReceipt, GatewayError> {
        sleep(Duration::from_millis(self.config.delai_ms)).await;

        if rand::rng().random_bool(self.config.taux_echec) {
            return Err(GatewayError::Declined(
                "solde insuffisant chez l'opérateur".to_string(),
            ));
        }

        Ok(PaymentReceipt {
            transaction_id: espeat_core::new_id(),
            moyen: demande.moyen,
            montant: demande.montant,
        })
    }
}

fn valider_telephone(telephone: &str) -> Result<(), GatewayError> {
    let chiffres: String = telephone.chars().filter(|c| c.is_ascii_digit()).collect();
    if chiffres.len() < 9 || !telephone.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return Err(GatewayError::InvalidPhone(telephone.to_string()));
    }
    Ok(())
}

#[async_trait]
impl PaymentGateway for MobileMoneyGateway {
    async fn charge(&self, demande: PaymentRequest) -> Result<PaymentReceipt, GatewayError> {
        valider_telephone(&demande.telephone)?;

        let tentatives_max = self.config.tentatives_max.max(1);
        let mut derniere = GatewayError::Timeout {
            tentatives: tentatives_max,
        };

        for tentative in 1..=tentatives_max {
            match timeout(
                Duration::from_millis(self.config.timeout_ms),
                self.tenter(&demande),
            )
            .await
            {
                Ok(Ok(recu)) => {
                    info!(
                        transaction = %recu.transaction_id,
                        moyen = %recu.moyen,
                        montant = recu.montant,
                        tentative,
                        "paiement accepté"
                    );
                    return Ok(recu);
                }
                Ok(Err(err)) => {
                    warn!(tentative, erreur = %err, "tentative de paiement refusée");
                    derniere = err;
                }
                Err(_) => {
                    warn!(tentative, "l'opérateur n'a pas répondu dans les délais");
                    derniere = GatewayError::Timeout {
                        tentatives: tentative,
                    };
                }
            }

            if tentative < tentatives_max {
                // linear backoff between attempts
                sleep(Duration::from_millis(self.config.delai_ms / 2 * u64::from(tentative))).await;
            }
        }

        Err(derniere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use espeat_core::MoyenPaiement;

    fn config_rapide(taux_echec: f64) -> PaymentConfig {
        PaymentConfig {
            delai_ms: 1,
            taux_echec,
            timeout_ms: 200,
            tentatives_max: 2,
        }
    }

    fn demande(telephone: &str) -> PaymentRequest {
        PaymentRequest {
            moyen: MoyenPaiement::Wave,
            telephone: telephone.to_string(),
            montant: 200,
        }
    }

    #[tokio::test]
    async fn charge_succeeds_when_operator_accepts() {
        let gateway = MobileMoneyGateway::new(config_rapide(0.0));
        let recu = gateway.charge(demande("77 123 45 67")).await.unwrap();
        assert_eq!(recu.montant, 200);
        assert_eq!(recu.moyen, MoyenPaiement::Wave);
    }

    #[tokio::test]
    async fn charge_is_declined_after_retries_when_operator_always_refuses() {
        let gateway = MobileMoneyGateway::new(config_rapide(1.0));
        let err = gateway.charge(demande("771234567")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Declined(_)));
    }

    #[tokio::test]
    async fn charge_times_out_when_operator_never_answers() {
        let gateway = MobileMoneyGateway::new(PaymentConfig {
            delai_ms: 500,
            taux_echec: 0.0,
            timeout_ms: 5,
            tentatives_max: 2,
        });
        let err = gateway.charge(demande("771234567")).await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout { tentatives: 2 });
    }

    #[tokio::test]
    async fn charge_rejects_malformed_phone_numbers() {
        let gateway = MobileMoneyGateway::new(config_rapide(0.0));
        for telephone in ["", "abc", "77-12", "7712345a7"] {
            let err = gateway.charge(demande(telephone)).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidPhone(_)), "{telephone}");
        }
    }
}
