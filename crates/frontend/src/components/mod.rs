mod spinner;
mod voucher_card;

pub use spinner::LoadingSpinner;
pub use voucher_card::VoucherCard;
