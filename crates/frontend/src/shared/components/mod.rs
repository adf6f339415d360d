pub mod month_navigator;
pub mod stat_card;
