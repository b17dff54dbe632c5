use super::Operations;
use crate::Result;

use tidemark_core::Error;

use std::{fmt, sync::Arc};

/// A migration body.
pub type MigrationFn = Arc<dyn Fn(&mut Operations<'_>) -> Result<()> + Send + Sync>;

/// A migration's key: free text starting with a numeric version token, e.g.
/// `"0002: remove column yams"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    key: String,
    token: String,
    number: u64,
}

impl VersionKey {
    pub fn parse(key: &str) -> Result<VersionKey> {
        let digits = key.bytes().take_while(u8::is_ascii_digit).count();
        let token = &key[..digits];

        let number = token.parse::<u64>().map_err(|_| {
            Error::invalid_migration(format!("version key `{key}` must start with a version number"))
        })?;

        Ok(VersionKey {
            key: key.to_string(),
            token: token.to_string(),
            number,
        })
    }

    /// The key as declared.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The leading version token, e.g. `"0002"`.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The token's numeric value, used for ordering.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// An `up` body and an optional `down` body.
#[derive(Clone)]
pub struct Migration {
    pub(super) up: MigrationFn,

    /// `None` marks the migration irreversible.
    pub(super) down: Option<MigrationFn>,
}

impl Migration {
    pub fn new(up: impl Fn(&mut Operations<'_>) -> Result<()> + Send + Sync + 'static) -> Migration {
        Migration {
            up: Arc::new(up),
            down: None,
        }
    }

    pub fn down(
        mut self,
        down: impl Fn(&mut Operations<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> Migration {
        self.down = Some(Arc::new(down));
        self
    }

    pub fn is_reversible(&self) -> bool {
        self.down.is_some()
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("reversible", &self.is_reversible())
            .finish()
    }
}

/// A model's migrations, ordered by version number.
#[derive(Debug, Clone)]
pub struct MigrationSet {
    migrations: Vec<(VersionKey, Migration)>,
}

#[derive(Debug, Default)]
pub struct MigrationSetBuilder {
    migrations: Vec<(String, Migration)>,
}

impl MigrationSet {
    pub fn builder() -> MigrationSetBuilder {
        MigrationSetBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Declared keys in ascending version order.
    pub fn keys(&self) -> impl Iterator<Item = &VersionKey> {
        self.migrations.iter().map(|(key, _)| key)
    }

    /// The migration whose version number equals `version`'s leading number.
    ///
    /// `"2"`, `"0002"` and `"0002: remove yams"` all find the migration
    /// declared as `"0002: remove yams"`.
    pub fn find(&self, version: &str) -> Result<(&VersionKey, &Migration)> {
        let number = VersionKey::parse(version)
            .map_err(|_| Error::migration_not_found(version))?
            .number();

        self.migrations
            .iter()
            .find(|(key, _)| key.number() == number)
            .map(|(key, migration)| (key, migration))
            .ok_or_else(|| Error::migration_not_found(version))
    }

    /// Token of the closest migration declared before `version`, or
    /// `baseline` when there is none.
    pub fn previous(&self, version: &str, baseline: &str) -> Result<String> {
        let (key, _) = self.find(version)?;

        Ok(self
            .migrations
            .iter()
            .rev()
            .find(|(earlier, _)| earlier.number() < key.number())
            .map(|(earlier, _)| earlier.token().to_string())
            .unwrap_or_else(|| baseline.to_string()))
    }

    /// Migrations newer than `current`, in ascending order.
    pub fn pending(&self, current: &str) -> Result<Vec<(&VersionKey, &Migration)>> {
        let current = VersionKey::parse(current)
            .map_err(|err| err.context(Error::invalid_migration("unreadable ledger version")))?
            .number();

        Ok(self
            .migrations
            .iter()
            .filter(|(key, _)| key.number() > current)
            .map(|(key, migration)| (key, migration))
            .collect())
    }
}

impl MigrationSetBuilder {
    pub fn migration(mut self, key: impl Into<String>, migration: Migration) -> Self {
        self.migrations.push((key.into(), migration));
        self
    }

    /// Adds a migration that cannot be reverted.
    pub fn irreversible(
        self,
        key: impl Into<String>,
        up: impl Fn(&mut Operations<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.migration(key, Migration::new(up))
    }

    /// Fails on a key without a leading version number, or on two keys with
    /// the same number.
    pub fn build(self) -> Result<MigrationSet> {
        let mut migrations = self
            .migrations
            .into_iter()
            .map(|(key, migration)| Ok((VersionKey::parse(&key)?, migration)))
            .collect::<Result<Vec<_>>>()?;

        migrations.sort_by_key(|(key, _)| key.number());

        for pair in migrations.windows(2) {
            let (a, b) = (&pair[0].0, &pair[1].0);
            if a.number() == b.number() {
                return Err(Error::invalid_migration(format!(
                    "version keys `{a}` and `{b}` share version number {}",
                    a.number()
                )));
            }
        }

        Ok(MigrationSet { migrations })
    }
}
