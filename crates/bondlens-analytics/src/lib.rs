//! # Bondlens Analytics
//!
//! Bond valuation engine: discrete coupon-bond pricing, yield-to-maturity
//! solving and first/second order interest-rate risk.
//!
//! ## Quick Start
//!
//! ```rust
//! use bondlens_analytics::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .name("Treasury 5Y")
//!     .face_value(1000.0)
//!     .coupon_rate(0.05)
//!     .years_to_maturity(5.0)
//!     .frequency(Frequency::SemiAnnual)
//!     .market_price(1044.52)
//!     .build()
//!     .unwrap();
//!
//! let bond = BondValuation::new(terms).unwrap();
//! assert!(!bond.is_low_confidence());
//! assert!(bond.modified_duration() <= bond.macaulay_duration());
//! ```
//!
//! ## Yield Solving
//!
//! Yields are found with a bracketing solver over `[-10%, 100%]`. When the
//! market price cannot be reached inside that bracket the valuation falls
//! back to the coupon rate and reports [`YieldConfidence::CouponFallback`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod frequency;
pub mod settings;
pub mod terms;
pub mod valuation;

pub use error::{AnalyticsError, AnalyticsResult};
pub use frequency::Frequency;
pub use settings::{SolverMethod, YieldSolverSettings};
pub use terms::{BondTerms, BondTermsBuilder};
pub use valuation::{BondValuation, YieldConfidence, YieldSolution, BASIS_POINT};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::frequency::Frequency;
    pub use crate::settings::{SolverMethod, YieldSolverSettings};
    pub use crate::terms::{BondTerms, BondTermsBuilder};
    pub use crate::valuation::{BondValuation, YieldConfidence, YieldSolution};
}
