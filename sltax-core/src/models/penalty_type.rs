use serde::{Deserialize, Serialize};

/// Kind of compliance breach a penalty is charged for. Selects the penalty
/// formula in [`crate::PenaltyInterestCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyType {
    LateFiling,
    LatePayment,
    UnderDeclaration,
}
