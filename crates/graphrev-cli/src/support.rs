use graphrev_revision::{RequestContext, RevisionConfig, RevisionError, RevisionService};
use graphrev_store::{AtomicStoreMutationError, MemoryTripleStore, mutate_store_jsonl};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Global flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: String,
    pub store: Option<String>,
    pub actor: Option<String>,
}

/// Resolved config plus the request context for the acting user.
pub struct Session {
    pub config: RevisionConfig,
    pub ctx: RequestContext,
}

impl Session {
    pub fn store_path(&self) -> &Path {
        &self.config.store_path
    }
}

pub fn load_session_or_exit(globals: &GlobalArgs) -> Session {
    let mut config = RevisionConfig::load_or_default(&globals.config)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
        .apply_env_overrides();
    if let Some(store) = &globals.store {
        config.store_path = PathBuf::from(store);
    }
    if let Some(actor) = globals.actor.as_deref().map(str::trim)
        && !actor.is_empty()
    {
        config.actor = actor.to_string();
    }
    tracing::debug!(
        store = %config.store_path.display(),
        actor = %config.actor,
        interface = %config.interface_version,
        "session loaded"
    );
    let ctx = RequestContext::new(config.actor.clone());
    Session { config, ctx }
}

pub fn parse_or_exit<T>(raw: &str) -> T
where
    T: FromStr,
    RevisionError: From<T::Err>,
{
    raw.parse::<T>()
        .unwrap_or_else(|e| exit_with(&RevisionError::from(e)))
}

pub fn exit_with(err: &RevisionError) -> ! {
    if let Some(detail) = err.debug_detail() {
        tracing::debug!(code = %err.code(), detail = %detail, "command failed");
    }
    eprintln!("error: {err}");
    std::process::exit(1);
}

fn build_service_or_exit(store: Arc<MemoryTripleStore>, config: &RevisionConfig) -> RevisionService {
    RevisionService::from_config(store, config).unwrap_or_else(|e| exit_with(&e))
}

/// Run a read-only operation against the store file. A missing file reads
/// as an empty store.
pub fn with_service_or_exit<T>(
    session: &Session,
    op: impl FnOnce(&RevisionService, &RequestContext) -> Result<T, RevisionError>,
) -> T {
    let path = session.store_path();
    let store = if path.exists() {
        MemoryTripleStore::load_jsonl(path).unwrap_or_else(|e| {
            eprintln!("error: failed to load {}: {e}", path.display());
            std::process::exit(1);
        })
    } else {
        MemoryTripleStore::new()
    };
    let service = build_service_or_exit(Arc::new(store), &session.config);
    op(&service, &session.ctx).unwrap_or_else(|e| exit_with(&e))
}

/// Run a mutation under the store lock; the store is persisted only when
/// the operation succeeds.
pub fn mutate_with_service_or_exit<T>(
    session: &Session,
    op: impl FnOnce(&RevisionService, &RequestContext) -> Result<T, RevisionError>,
) -> T {
    let result = mutate_store_jsonl::<T, RevisionError, _>(session.store_path(), |store| {
        let service = RevisionService::from_config(store.clone(), &session.config)?;
        let value = op(&service, &session.ctx)?;
        Ok((value, true))
    });
    result.unwrap_or_else(|error| match error {
        AtomicStoreMutationError::Mutation(err) => exit_with(&err),
        other => {
            eprintln!("error: {other}");
            std::process::exit(1);
        }
    })
}

pub fn print_json(action: &str, payload: &Value) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {action} payload: {err}");
        std::process::exit(2);
    });
    println!("{rendered}");
}
