
// --- Unit Tests ---
pub mod unit {
    pub mod access_test;
    pub mod fees_test;
    pub mod license_test;
    pub mod lifecycle_test;
    pub mod sellers_test;
    pub mod settlement_test;
}
