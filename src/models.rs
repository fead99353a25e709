pub mod ApiResponse;
pub mod CashFlow;
pub mod Disbursement;
pub mod Payment;
pub mod session;
