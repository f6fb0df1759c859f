use crate::models::{
    normalize_url, ListingStatus, NewProperty, Property, PropertyId, PropertyType, PropertyUpdate,
};
use crate::store::traits::{PropertyStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const DEFAULT_DATABASE: &str = "real-estate";
const COLLECTION: &str = "properties";

const NAMESPACE_EXISTS: i32 = 48;
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

/// Listing as persisted in the `properties` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    price: f64,
    location: String,
    #[serde(rename = "type")]
    property_type: PropertyType,
    status: ListingStatus,
    bedrooms: f64,
    bathrooms: f64,
    area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    created_at: BsonDateTime,
}

impl From<&Property> for PropertyDocument {
    fn from(p: &Property) -> Self {
        Self {
            id: p.id.object_id(),
            title: p.title.clone(),
            description: p.description.clone(),
            price: p.price,
            location: p.location.clone(),
            property_type: p.property_type,
            status: p.status,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area: p.area,
            image_url: p.image_url.clone(),
            created_at: BsonDateTime::from_millis(p.created_at.timestamp_millis()),
        }
    }
}

impl From<PropertyDocument> for Property {
    fn from(d: PropertyDocument) -> Self {
        Self {
            id: d.id.into(),
            title: d.title,
            description: d.description,
            price: d.price,
            location: d.location,
            property_type: d.property_type,
            status: d.status,
            bedrooms: d.bedrooms,
            bathrooms: d.bathrooms,
            area: d.area,
            image_url: d.image_url,
            created_at: to_chrono(d.created_at),
        }
    }
}

fn to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

/// MongoDB-backed listing store
pub struct MongoStore {
    collection: Collection<PropertyDocument>,
}

impl MongoStore {
    /// Connect using a `mongodb://` URI. The database named in the URI is used,
    /// falling back to `real-estate`.
    pub async fn connect(uri: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        db.run_command(doc! { "ping": 1 }).await?;
        info!("MongoDB connected to database '{}'", db.name());

        ensure_schema(&db).await?;

        let collection = db.collection::<PropertyDocument>(COLLECTION);
        collection
            .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
            .await?;
        debug!("Ensured createdAt index on '{}'", COLLECTION);

        Ok(Self { collection })
    }
}

/// Install the collection's `$jsonSchema` validator, creating the collection if needed
async fn ensure_schema(db: &Database) -> StoreResult<()> {
    let validator = schema_validator();

    match db.create_collection(COLLECTION).validator(validator.clone()).await {
        Ok(()) => {
            info!("Created '{}' collection with schema validator", COLLECTION);
            Ok(())
        }
        Err(err) if command_code(&err) == Some(NAMESPACE_EXISTS) => {
            db.run_command(doc! { "collMod": COLLECTION, "validator": validator })
                .await?;
            debug!("Refreshed schema validator on '{}'", COLLECTION);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn schema_validator() -> Document {
    let types: Vec<&str> = PropertyType::ALL.iter().map(|t| t.as_str()).collect();
    let statuses: Vec<&str> = ListingStatus::ALL.iter().map(|s| s.as_str()).collect();
    let text = doc! { "bsonType": "string", "minLength": 1 };
    let amount = doc! { "bsonType": ["double", "int", "long", "decimal"], "minimum": 0 };

    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": [
                "title", "description", "price", "location", "type", "status",
                "bedrooms", "bathrooms", "area", "createdAt",
            ],
            "properties": {
                "title": text.clone(),
                "description": text.clone(),
                "location": text,
                "price": amount.clone(),
                "bedrooms": amount.clone(),
                "bathrooms": amount.clone(),
                "area": amount,
                "type": { "enum": types },
                "status": { "enum": statuses },
                "imageUrl": { "bsonType": "string" },
                "createdAt": { "bsonType": "date" },
            },
        }
    }
}

fn command_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(c) => Some(c.code),
        ErrorKind::Write(WriteFailure::WriteError(w)) => Some(w.code),
        _ => None,
    }
}

/// Map driver errors, surfacing schema rejections as validation failures
fn classify(err: MongoError) -> StoreError {
    if command_code(&err) == Some(DOCUMENT_VALIDATION_FAILURE) {
        warn!("Document rejected by schema validator: {}", err);
        StoreError::Rejected(err.to_string())
    } else {
        StoreError::from(err)
    }
}

/// Build the `$set`/`$unset` modifier for a partial update
fn update_modifier(update: &PropertyUpdate) -> StoreResult<Document> {
    let mut fields = update.clone();
    let image = fields.image_url.take();

    let mut set = bson::to_document(&fields).map_err(|e| StoreError::Backend(e.to_string()))?;
    for key in ["title", "description", "location"] {
        if let Some(Bson::String(s)) = set.get_mut(key) {
            *s = s.trim().to_string();
        }
    }

    let mut modifier = Document::new();
    if let Some(url) = image.as_deref() {
        match normalize_url(Some(url)) {
            Some(url) => {
                set.insert("imageUrl", url);
            }
            None => {
                modifier.insert("$unset", doc! { "imageUrl": "" });
            }
        }
    }
    if !set.is_empty() {
        modifier.insert("$set", set);
    }
    Ok(modifier)
}

#[async_trait]
impl PropertyStore for MongoStore {
    async fn list(&self) -> StoreResult<Vec<Property>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;
        let docs: Vec<PropertyDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Property::from).collect())
    }

    async fn create(&self, new: NewProperty) -> StoreResult<Property> {
        let created_at = to_chrono(BsonDateTime::now());
        let property = Property::from_new(PropertyId::new(), new, created_at);

        self.collection
            .insert_one(PropertyDocument::from(&property))
            .await
            .map_err(classify)?;
        Ok(property)
    }

    async fn update(&self, id: PropertyId, update: PropertyUpdate) -> StoreResult<Property> {
        let filter = doc! { "_id": id.object_id() };
        let modifier = update_modifier(&update)?;

        let updated = if modifier.is_empty() {
            self.collection.find_one(filter).await?
        } else {
            self.collection
                .find_one_and_update(filter, modifier)
                .return_document(ReturnDocument::After)
                .await
                .map_err(classify)?
        };

        updated.map(Property::from).ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: PropertyId) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(result.deleted_count > 0)
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
