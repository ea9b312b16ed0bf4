use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};
use crate::storage::{Category, CategoryStorage};

/// File-per-category JSON document store.
///
/// Each concrete category lives in `<data_dir>/<category>.json` as a
/// pretty-printed JSON document with no surrounding metadata. There is no
/// locking: concurrent saves to the same category are last-write-wins.
#[derive(Clone, Debug)]
pub struct FileCategoryStore {
    data_dir: PathBuf,
}

impl FileCategoryStore {
    /// Initialize the store rooted at `data_dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> StoreResult<Arc<Self>> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::Io { path: data_dir.clone(), source })?;
        Ok(Arc::new(Self { data_dir }))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    /// Read and parse one concrete category; `Ok(None)` when no file exists yet.
    pub async fn read_document(&self, category: Category) -> StoreResult<Option<Value>> {
        let path = self.path_for(category);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%category, path = %path.display(), "no stored document");
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::MalformedStoredData { path, source })
    }

    /// Overwrite one concrete category's file with `document`.
    pub async fn write_document(&self, category: Category, document: &Value) -> StoreResult<()> {
        let path = self.path_for(category);
        let data = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Io { path: path.clone(), source: e.into() })?;
        fs::write(&path, data)
            .await
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        info!(%category, path = %path.display(), "document saved");
        Ok(())
    }

    /// Persist a document. For `All` the document must be an object holding
    /// every concrete category; the files are then written one by one with no
    /// rollback, so an I/O failure part way leaves earlier files committed.
    pub async fn save(&self, category: Category, document: Option<Value>) -> StoreResult<Vec<Category>> {
        let document = match document {
            Some(Value::Null) | None => return Err(StoreError::missing("data")),
            Some(doc) => doc,
        };

        if !category.is_all() {
            self.write_document(category, &document).await?;
            return Ok(vec![category]);
        }

        let Value::Object(mut parts) = document else {
            return Err(StoreError::MissingParameter(
                "data must be an object keyed by category".into(),
            ));
        };
        // 先校验全部分类，避免只写入一部分后才发现缺参数
        let mut docs = Vec::with_capacity(Category::CONCRETE.len());
        for c in Category::CONCRETE {
            match parts.remove(c.as_str()) {
                Some(Value::Null) | None => return Err(StoreError::MissingParameter(format!("data.{c}"))),
                Some(doc) => docs.push((c, doc)),
            }
        }

        let mut written = Vec::with_capacity(docs.len());
        for (c, doc) in docs {
            self.write_document(c, &doc).await?;
            written.push(c);
        }
        Ok(written)
    }

    /// Load a document. A concrete category with no file yields `{}`;
    /// `All` yields an object keyed by category with absent files omitted.
    pub async fn load(&self, category: Category) -> StoreResult<Value> {
        if !category.is_all() {
            let doc = self.read_document(category).await?;
            return Ok(doc.unwrap_or_else(|| Value::Object(Map::new())));
        }

        let mut result = Map::new();
        for c in Category::CONCRETE {
            if let Some(doc) = self.read_document(c).await? {
                result.insert(c.as_str().to_string(), doc);
            }
        }
        Ok(Value::Object(result))
    }
}

#[async_trait]
impl CategoryStorage for FileCategoryStore {
    async fn save(&self, category: Category, document: Option<Value>) -> StoreResult<Vec<Category>> {
        self.save(category, document).await
    }
    async fn load(&self, category: Category) -> StoreResult<Value> { self.load(category).await }
}
