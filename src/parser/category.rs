use crate::types::MovementKind;

const RECEIVED_KEYWORDS: &[&str] = &[
    "recebido",
    "received",
    "recibido",
    "parcela",
    "installment",
    "cuota",
];
const SETTLED_KEYWORDS: &[&str] = &["quitado", "settled", "liquidado"];
const RENEWAL_KEYWORDS: &[&str] = &[
    "renovação",
    "renovacao",
    "renewal",
    "renovación",
    "renovacion",
];
const AGREEMENT_KEYWORDS: &[&str] = &["acordo", "agreement", "acuerdo"];
const DISBURSEMENT_KEYWORDS: &[&str] = &["liberado", "disbursed", "entregado"];

/// Classify a movement line by case-insensitive substring tests against
/// multilingual keyword sets.
///
/// Priority: receipt keywords beat settlement, settlement beats renewal.
/// Agreement lines without a receipt keyword describe a change of obligation,
/// not cash, and are classified (and later excluded from cash totals) as
/// [`MovementKind::Agreement`].
pub fn classify(line: &str) -> Option<MovementKind> {
    let lowered = line.to_lowercase();
    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if matches_any(RECEIVED_KEYWORDS) {
        Some(MovementKind::Installment)
    } else if matches_any(SETTLED_KEYWORDS) {
        Some(MovementKind::Settlement)
    } else if matches_any(RENEWAL_KEYWORDS) {
        Some(MovementKind::Renewal)
    } else if matches_any(AGREEMENT_KEYWORDS) {
        Some(MovementKind::Agreement)
    } else if matches_any(DISBURSEMENT_KEYWORDS) {
        Some(MovementKind::Disbursement)
    } else {
        None
    }
}
