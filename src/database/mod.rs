use mongodb::bson::doc;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

pub const DEFAULT_DATABASE: &str = "usersearch";
pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Database name comes from the URI path, e.g. mongodb://host:27017/usersearch
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the index backing name search
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);
        let name_index = IndexModel::builder().keys(doc! { "name": 1 }).build();

        match users.create_index(name_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(name)", USERS_COLLECTION),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
