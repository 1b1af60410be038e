use async_trait::async_trait;
use common::{
    env_config::ProcedureNames,
    error::{AppError, Res},
};
use log::warn;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::usage::{UsageStore, validate_procedure_name};

/// Invokes the usage procedures through a PostgREST-style RPC endpoint:
/// `POST {base}/rest/v1/rpc/<procedure>` with the user id as the only argument.
pub struct RestUsageStore {
    client: Client,
    rpc_base: Url,
    api_key: String,
    user_arg: String,
    procedures: ProcedureNames,
}

impl RestUsageStore {
    pub fn new(
        rpc_url: &str,
        api_key: String,
        user_arg: String,
        procedures: ProcedureNames,
    ) -> Res<Self> {
        validate_procedure_name(&procedures.check)?;
        validate_procedure_name(&procedures.increment)?;

        let base = format!("{}/", rpc_url.trim_end_matches('/'));
        let rpc_base = Url::parse(&base)
            .and_then(|url| url.join("rest/v1/rpc/"))
            .map_err(|e| AppError::Internal(format!("Invalid RPC_URL '{}': {}", rpc_url, e)))?;

        Ok(RestUsageStore {
            client: Client::new(),
            rpc_base,
            api_key,
            user_arg,
            procedures,
        })
    }

    fn procedure_url(&self, procedure: &str) -> Res<Url> {
        self.rpc_base
            .join(procedure)
            .map_err(|e| AppError::Internal(format!("Invalid procedure URL for {}: {}", procedure, e)))
    }

    async fn call<T: DeserializeOwned>(&self, procedure: &str, user_id: Uuid) -> Res<T> {
        let mut args = serde_json::Map::new();
        args.insert(self.user_arg.clone(), serde_json::json!(user_id));

        let response = self
            .client
            .post(self.procedure_url(procedure)?)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&args)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("RPC {} answered {}: {}", procedure, status, body);
            return Err(AppError::Internal(format!(
                "RPC {} failed with status {}",
                procedure, status
            )));
        }

        let value: Option<T> = response.json().await?;
        value.ok_or_else(|| AppError::Internal(format!("RPC {} returned null", procedure)))
    }
}

#[async_trait]
impl UsageStore for RestUsageStore {
    async fn can_generate(&self, user_id: Uuid) -> Res<bool> {
        self.call(&self.procedures.check, user_id).await
    }

    async fn increment_usage(&self, user_id: Uuid) -> Res<i64> {
        self.call(&self.procedures.increment, user_id).await
    }
}
