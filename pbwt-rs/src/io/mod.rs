pub mod haplotypes;
pub mod matches;
