pub mod bases;
pub mod corporate;
pub mod css;
pub mod irpp;
pub mod vat;

pub use bases::{
    evaluate_tax_bases, CssBase, ImfBase, IrppBase, IsBase, TaxBases, TaxEvaluation, VatBase,
};
pub use corporate::{compute_is_vs_imf, AppliedTax, CorporateTaxResult, DEFAULT_IS_RATE, IMF_RATE};
pub use css::{compute_css, CssResult, DEFAULT_CSS_RATE};
pub use irpp::{compute_irpp, IrppResult};
pub use vat::{compute_tva, VatResult};
