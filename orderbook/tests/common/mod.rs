//! Shared fixtures for the order book integration tests

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use orderbook::{DatasetLoader, MutationGateway, RealCsvStore};

/// Legacy file without an `Order_ID` column, one row with an unreadable date
pub const LEGACY_ORDERS: &str = "\
Date,Customer_Name,Phone_Number,Order_Title,Details,Pax,Pramusaji,Event_Type,Location,Menu_Items,Revenue,Deposit_Paid
2025-03-15,Aisyah,0123456789,Walimah Aisyah,,300,6,Wedding,Shah Alam,\"['Nasi Minyak', 'Ayam Masak Merah']\",5400,yes
2025-01-20,Unknown,0198765432,Majlis Tahlil,,80,2,Tahlil,Gombak,['Bihun Goreng'],,no
TBC,Bala,0111222333,Company Lunch,,50,1,Corporate,Petaling Jaya,['Nasi Lemak'],1250,yes
2025-02-10,Chong,0177777777,Packet Lunch,,200,0,Packet,Cyberjaya,['Nasi Ayam'],0,no
";

pub struct Fixture {
    pub dir: TempDir,
    pub store: Arc<RealCsvStore>,
    pub loader: DatasetLoader<RealCsvStore>,
    pub gateway: MutationGateway<RealCsvStore>,
}

impl Fixture {
    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(&path, contents).unwrap();
        Self::at(dir, path)
    }

    /// No order file yet
    pub fn missing() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.csv");
        Self::at(dir, path)
    }

    fn at(dir: TempDir, path: std::path::PathBuf) -> Self {
        let store = Arc::new(RealCsvStore::new(path));
        Self {
            loader: DatasetLoader::new(Arc::clone(&store)),
            gateway: MutationGateway::new(Arc::clone(&store)),
            store,
            dir,
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(self.store.path()).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes()).unwrap()
    }
}
