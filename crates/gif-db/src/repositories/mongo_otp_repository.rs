//! MongoDB implementation of the `OtpRepository` trait.

use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use gif_core::{NewOtp, OtpRecord, OtpRepository, RepositoryError};

use super::OTPS;
use super::documents::{OtpDocument, parse_id, storage};

pub struct MongoOtpRepository {
    otps: Collection<OtpDocument>,
}

impl MongoOtpRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            otps: db.collection(OTPS),
        }
    }
}

#[async_trait]
impl OtpRepository for MongoOtpRepository {
    async fn replace(&self, otp: &NewOtp) -> Result<OtpRecord, RepositoryError> {
        // Upsert on the unique `email` index: one round trip, one record.
        let document = OtpDocument::from(otp);
        let stored = self
            .otps
            .find_one_and_replace(doc! { "email": otp.email.as_str() }, &document)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| storage(&e))?
            .ok_or_else(|| RepositoryError::Storage(format!("OTP upsert for {} returned nothing", otp.email)))?;
        OtpRecord::try_from(stored)
    }

    async fn find(&self, email: &str, verified: bool) -> Result<Option<OtpRecord>, RepositoryError> {
        self.otps
            .find_one(doc! { "email": email, "verified": verified })
            .await
            .map_err(|e| storage(&e))?
            .map(OtpRecord::try_from)
            .transpose()
    }

    async fn consume_attempt(&self, id: &str, limit: u32) -> Result<Option<u32>, RepositoryError> {
        let oid = parse_id(id)?;
        let updated = self
            .otps
            .find_one_and_update(
                doc! { "_id": oid, "attempts": { "$lt": i64::from(limit) } },
                doc! { "$inc": { "attempts": 1 } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| storage(&e))?;
        Ok(updated.map(|d| u32::try_from(d.attempts).unwrap_or(limit)))
    }

    async fn mark_verified(
        &self,
        id: &str,
        entered_code: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        let mut set = doc! { "verified": true };
        if let Some(code) = entered_code {
            set.insert("provider_code", code);
        }
        let result = self
            .otps
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await
            .map_err(|e| storage(&e))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound(format!("OTP {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let oid = parse_id(id)?;
        self.otps
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| storage(&e))?;
        Ok(())
    }

    async fn delete_for_email(&self, email: &str) -> Result<u64, RepositoryError> {
        let result = self
            .otps
            .delete_many(doc! { "email": email })
            .await
            .map_err(|e| storage(&e))?;
        Ok(result.deleted_count)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = self
            .otps
            .delete_many(doc! { "expires_at": { "$lt": bson::DateTime::from_chrono(now) } })
            .await
            .map_err(|e| storage(&e))?;
        Ok(result.deleted_count)
    }
}
