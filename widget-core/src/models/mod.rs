mod estimate;
mod persona;
mod policy;
mod quiz;
mod rate_table;
mod tax_bracket;

pub use estimate::{
    CHILDREN_RANGE, DEPENDENTS_RANGE, EstimateInput, EstimateResult, MAX_AMOUNT, PeriodBasis,
    SeveranceHandling, TaxMode, clamp_count,
};
pub use persona::{
    DEFAULT_ESCALATION_THRESHOLD, DEFAULT_FALLBACK, Persona, PersonaError, ResponseRule,
};
pub use policy::PayrollPolicy;
pub use quiz::{Choice, PersonalityType, Question, Quiz, QuizError};
pub use rate_table::{RateTable, RateTableError};
pub use tax_bracket::{BracketTableError, TaxBracket, TaxBracketTable};
