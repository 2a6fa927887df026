use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::helpers::{
    assert_distinct_technologies, assert_participant, assert_required_fields,
    assert_valid_address,
};
use crate::state::{AchievementDraft, AchievementRecord, Attribute, MintConfig, NftMetadata};
use crate::storage::AchievementStore;

/// Opaque publish failure. The mint engine only logs it and falls back, so
/// implementations keep their own error types.
pub type PublishFailure = Box<dyn Error + Send + Sync>;

/// Capability handed to the mint engine for off-chain metadata publishing.
/// A failing publisher never aborts a mint; the engine substitutes
/// [`fallback_cid`].
pub trait MetadataPublisher {
    fn publish(&self, metadata: &NftMetadata) -> Result<String, PublishFailure>;
}

/// Locally derived placeholder content identifier, used when publishing
/// fails: "Qm" plus 44 hex characters of the metadata digest. Deterministic
/// for a given metadata value.
pub fn fallback_cid(metadata: &NftMetadata) -> String {
    // Plain string fields, encoding cannot fail.
    let canonical = serde_json::to_string(metadata).unwrap_or_default();
    let digest = Sha256::digest(canonical.as_bytes());
    format!("Qm{}", &hex::encode(digest)[..44])
}

// ─── Mint gate ──────────────────────────────────────────────────────────────

/// At most one in-flight mint per engine. A second call fails fast with
/// `Busy` instead of queueing; the flag releases on drop, also on the error
/// paths.
struct MintGate<'a>(&'a AtomicBool);

impl<'a> MintGate<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, RegistryError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RegistryError::Busy);
        }
        Ok(Self(flag))
    }
}

impl Drop for MintGate<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Simulated mint engine: validates a draft, allocates identifiers,
/// assembles the record and delegates persistence. Atomic to the caller —
/// either a complete record is appended and returned, or nothing is
/// persisted.
pub struct Minter<P> {
    publisher: P,
    config: MintConfig,
    in_flight: AtomicBool,
}

impl<P: MetadataPublisher> Minter<P> {
    pub fn new(publisher: P, config: MintConfig) -> Self {
        Self {
            publisher,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn mint(
        &self,
        store: &dyn AchievementStore,
        draft: &AchievementDraft,
        description: &str,
    ) -> Result<AchievementRecord, RegistryError> {
        let _gate = MintGate::acquire(&self.in_flight)?;

        assert_required_fields(draft)?;
        assert_valid_address(&draft.owner)?;
        assert_participant(draft.participant.as_deref())?;
        assert_distinct_technologies(&draft.technologies)?;
        if description.trim().is_empty() {
            return Err(RegistryError::validation("description", "required field is empty"));
        }

        if self.config.simulated_latency > Duration::ZERO {
            thread::sleep(self.config.simulated_latency);
        }

        let attributes = build_attributes(draft);
        let metadata = NftMetadata {
            name: draft.title.clone(),
            description: description.to_string(),
            attributes: attributes.clone(),
        };
        let ipfs_hash = match self.publisher.publish(&metadata) {
            Ok(cid) => cid,
            Err(error) => {
                warn!(%error, "metadata publish failed, using local fallback identifier");
                fallback_cid(&metadata)
            }
        };

        // Identifier collisions regenerate and retry a bounded number of
        // times; an existing record is never overwritten.
        let mut rng = rand::thread_rng();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let record = AchievementRecord {
                token_id: rng.gen_range(0..self.config.token_bound.max(1)).to_string(),
                name: draft.title.clone(),
                description: description.to_string(),
                attributes: attributes.clone(),
                transaction_hash: random_transaction_hash(&mut rng),
                minted_at: Utc::now(),
                owner: draft.owner.clone(),
                ipfs_hash: Some(ipfs_hash.clone()),
            };
            match store.append(&record) {
                Ok(()) => {
                    info!(token_id = %record.token_id, owner = %record.owner, "achievement minted");
                    return Ok(record);
                }
                Err(RegistryError::Conflict { token_id })
                    if attempt < self.config.max_id_attempts =>
                {
                    debug!(%token_id, attempt, "identifier collision, regenerating");
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Attribute order is fixed: Type, Role, Participant (when present),
/// Technologies, Date. Renderers rely on it being deterministic.
fn build_attributes(draft: &AchievementDraft) -> Vec<Attribute> {
    let mut attributes = vec![
        Attribute::new("Type", draft.achievement_type.as_str()),
        Attribute::new("Role", draft.role.clone()),
    ];
    if let Some(participant) = &draft.participant {
        attributes.push(Attribute::new("Participant", participant.clone()));
    }
    attributes.push(Attribute::new("Technologies", draft.technologies.join(", ")));
    attributes.push(Attribute::new("Date", draft.date.format("%B %Y").to_string()));
    attributes
}

/// `0x` plus 64 lowercase hex characters from 32 random bytes.
fn random_transaction_hash(rng: &mut impl Rng) -> String {
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}
