//! Sandbox project archives
//!
//! Provides the [`ArchiveBuilder`] trait and [`ZipArchiveBuilder`], which
//! packs generated code, the model file and a minimal react-three-fiber
//! project into a zip.

use crate::error::ArchiveError;
use crate::file::{ModelFile, ModelFormat};
use crate::preview::PreviewConfig;
use async_trait::async_trait;
use indexmap::IndexMap;
use scenegen_codegen::Dialect;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Everything that goes into one archive
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    /// Model file, shipped under `public/`
    pub file: ModelFile,
    /// Generated `Model` source
    pub code: String,
    /// Source dialect
    pub dialect: Dialect,
    /// Staging for `App`
    pub preview: PreviewConfig,
}

/// Builds a project archive
#[async_trait]
pub trait ArchiveBuilder: Send + Sync + std::fmt::Debug {
    /// Build the archive bytes
    ///
    /// # Errors
    /// Returns [`ArchiveError`] when packing fails.
    async fn build(&self, request: &ArchiveRequest) -> Result<Vec<u8>, ArchiveError>;
}

/// Zip project builder
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveBuilder;

impl ZipArchiveBuilder {
    /// Create builder
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Project files by path, in archive order
    ///
    /// # Errors
    /// Returns [`ArchiveError::Manifest`] if `package.json` cannot be written.
    pub fn files(request: &ArchiveRequest) -> Result<IndexMap<String, Vec<u8>>, ArchiveError> {
        let ext = request.dialect.extension();
        let mut files = IndexMap::new();

        files.insert("package.json".to_string(), package_json(request)?);
        files.insert("public/index.html".to_string(), INDEX_HTML.as_bytes().to_vec());

        let model = match (request.file.format(), request.file.original_text()) {
            (ModelFormat::Gltf, Some(text)) => text.as_bytes().to_vec(),
            _ => request.file.bytes().to_vec(),
        };
        files.insert(format!("public/{}", request.file.name()), model);

        files.insert(format!("src/index.{ext}"), INDEX_SOURCE.as_bytes().to_vec());
        files.insert(format!("src/App.{ext}"), app_source(request).into_bytes());
        files.insert(format!("src/Model.{ext}"), request.code.as_bytes().to_vec());
        files.insert("src/styles.css".to_string(), STYLES.as_bytes().to_vec());
        if request.dialect == Dialect::Static {
            files.insert("tsconfig.json".to_string(), TSCONFIG.as_bytes().to_vec());
        }
        Ok(files)
    }

    fn pack(files: IndexMap<String, Vec<u8>>) -> Result<Vec<u8>, ArchiveError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        for (path, data) in files {
            zip.start_file(path, options)?;
            zip.write_all(&data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

#[async_trait]
impl ArchiveBuilder for ZipArchiveBuilder {
    async fn build(&self, request: &ArchiveRequest) -> Result<Vec<u8>, ArchiveError> {
        let files = Self::files(request)?;
        let count = files.len();
        let bytes = tokio::task::spawn_blocking(move || Self::pack(files))
            .await
            .map_err(|err| ArchiveError::Task(err.to_string()))??;
        tracing::info!(
            file = %request.file.name(),
            files = count,
            bytes = bytes.len(),
            "built sandbox archive"
        );
        Ok(bytes)
    }
}

fn package_json(request: &ArchiveRequest) -> Result<Vec<u8>, ArchiveError> {
    let ext = request.dialect.extension();
    let mut manifest = serde_json::json!({
        "name": request.file.stem(),
        "version": "0.1.0",
        "private": true,
        "main": format!("src/index.{ext}"),
        "dependencies": {
            "@react-three/drei": "^9.56.0",
            "@react-three/fiber": "^8.11.0",
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "react-scripts": "5.0.1",
            "three": "^0.149.0"
        },
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build"
        },
        "browserslist": [">0.2%", "not dead", "not ie <= 11", "not op_mini all"]
    });
    if request.dialect == Dialect::Static {
        manifest["devDependencies"] = serde_json::json!({
            "@types/react": "^18.0.27",
            "@types/react-dom": "^18.0.10",
            "@types/three": "^0.149.0",
            "typescript": "^4.9.5"
        });
    }
    Ok(serde_json::to_vec_pretty(&manifest)?)
}

fn app_source(request: &ArchiveRequest) -> String {
    let preview = &request.preview;
    let instanced = request.code.contains("export function Instances");
    let imports = if instanced { "Instances, Model" } else { "Model" };
    let model = if instanced {
        "<Instances>\n            <Model />\n          </Instances>"
    } else {
        "<Model />"
    };
    let environment = preview
        .environment
        .preset()
        .map_or_else(|| "{null}".to_string(), |name| format!("\"{name}\""));

    format!(
        r#"import React, {{ Suspense }} from 'react'
import {{ Canvas }} from '@react-three/fiber'
import {{ OrbitControls, Stage }} from '@react-three/drei'
import {{ {imports} }} from './Model'

export default function App() {{
  return (
    <Canvas shadows dpr={{[1.5, 2]}} camera={{{{ position: [0, 0, 150], fov: 50 }}}}>
      <Suspense fallback={{null}}>
        <Stage preset="{preset}" intensity={{{intensity}}} environment={environment} shadows={{{shadow}}}>
          {model}
        </Stage>
      </Suspense>
      <OrbitControls makeDefault autoRotate={{{rotate}}} />
    </Canvas>
  )
}}
"#,
        preset = preview.preset,
        intensity = preview.intensity,
        shadow = preview.contact_shadow,
        rotate = preview.auto_rotate,
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>scenegen sandbox</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

const INDEX_SOURCE: &str = r#"import React from 'react'
import { createRoot } from 'react-dom/client'
import './styles.css'
import App from './App'

createRoot(document.getElementById('root')).render(<App />)
"#;

const STYLES: &str = "* {
  box-sizing: border-box;
}

html,
body,
#root {
  width: 100%;
  height: 100%;
  margin: 0;
  padding: 0;
  overflow: hidden;
}
";

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "es2017",
    "lib": ["dom", "dom.iterable", "esnext"],
    "strict": true,
    "esModuleInterop": true,
    "skipLibCheck": true,
    "module": "esnext",
    "moduleResolution": "node",
    "resolveJsonModule": true,
    "jsx": "react-jsx"
  },
  "include": ["src"]
}
"#;
