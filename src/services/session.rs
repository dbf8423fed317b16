// src/services/session.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{common::error::AppError, models::auth::Session};

/// Porta de persistência da sessão atual.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, AppError>;
    async fn save(&self, session: &Session) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
}

/// Sessão em memória, espelhada em um arquivo JSON local.
///
/// O arquivo só é lido em `open`; as leituras seguintes vêm da memória.
/// Cada gravação vai para um arquivo temporário no mesmo diretório e depois
/// é renomeada por cima do arquivo final, então o arquivo nunca fica pela
/// metade. O lock de escrita serializa `save` e `clear`.
pub struct FileSessionStore {
    path: PathBuf,
    tmp_path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl FileSessionStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let current = read_session_file(&path).await?;
        Ok(Self { path, tmp_path, current: RwLock::new(current) })
    }
}

// Arquivo ausente ou corrompido: segue sem sessão (o corrompido é removido).
async fn read_session_file(path: &Path) -> Result<Option<Session>, AppError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Falha ao ler a sessão em {}", path.display()))
                .into())
        }
    };

    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!("⚠️ Sessão inválida em {} descartada: {}", path.display(), e);
            remove_if_exists(path).await?;
            Ok(None)
        }
    }
}

async fn remove_if_exists(path: &Path) -> Result<(), AppError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Falha ao remover a sessão em {}", path.display()))
            .into()),
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self.current.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        let mut current = self.current.write().await;

        let json = serde_json::to_string_pretty(session).context("Falha ao serializar a sessão")?;
        tokio::fs::write(&self.tmp_path, json)
            .await
            .with_context(|| format!("Falha ao gravar a sessão em {}", self.tmp_path.display()))?;
        tokio::fs::rename(&self.tmp_path, &self.path)
            .await
            .with_context(|| format!("Falha ao mover a sessão para {}", self.path.display()))?;

        *current = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut current = self.current.write().await;
        remove_if_exists(&self.path).await?;
        *current = None;
        Ok(())
    }
}

/// Sessão só em memória (`SESSION_FILE` vazio): some ao reiniciar.
#[derive(Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self.current.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        *self.current.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.current.write().await = None;
        Ok(())
    }
}
