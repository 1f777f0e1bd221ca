/// The model module contains the shop, its cars and its storage
pub mod car;
pub mod car_service;
pub mod catalog;
pub mod decision;
pub mod ledger;
pub mod part;
pub mod pricing;
pub mod random;
pub mod storage;

#[cfg(test)]
pub mod testing;
