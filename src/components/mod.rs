pub mod live_card;
