#![allow(dead_code)]

use std::collections::HashMap;
use stitch_core::project::{GameEntry, ProjectConfig, ScriptMeta, SourceProject};

pub const TILEMAP: &str = r#"// Auto-generated code. Do not edit.
namespace myTiles {
    //% fixedInstance jres blockIdentity=images._tile
    export const transparency16 = image.ofBuffer(hex``);
    //% fixedInstance jres blockIdentity=images._tile
    export const apple = image.ofBuffer(hex``);

    helpers._registerFactory("tilemap", function(name: string) {
        switch(helpers.stringTrim(name)) {
            case "level1":
            case "level1":return tiles.createTilemap(hex`0200`, img`. .`, [myTiles.transparency16,myTiles.apple], TileScale.Sixteen);
        }
        return null;
    })

    helpers._registerFactory("tile", function(name: string) {
        switch(helpers.stringTrim(name)) {
            case "transparency16":return transparency16;
            case "apple":return apple;
        }
        return null;
    })

}
// Auto-generated code. Do not edit.
"#;

pub const TILEMAP_JRES: &str = r#"{
    "transparency16": {"data": "hwQQABAAAAAAAAAA", "mimeType": "image/x-mkcd-f4", "tilemapTile": true},
    "apple": {"data": "hwQQABAAAAAREREREQ", "mimeType": "image/x-mkcd-f4", "tilemapTile": true, "displayName": "apple"},
    "*": {"mimeType": "image/x-mkcd-f4", "dataEncoding": "base64"}
}"#;

pub struct ProjectBuilder {
    author: String,
    url: String,
    text: HashMap<String, String>,
    files: Vec<String>,
    palette: Option<Vec<String>>,
    dependencies: serde_json::Map<String, serde_json::Value>,
}

impl ProjectBuilder {
    pub fn new(author: &str, id: &str) -> Self {
        ProjectBuilder {
            author: author.to_string(),
            url: format!("https://arcade.makecode.com/{}", id),
            text: HashMap::new(),
            files: Vec::new(),
            palette: None,
            dependencies: serde_json::Map::new(),
        }
    }

    /// Add a file and list it in the manifest.
    pub fn file(mut self, name: &str, text: &str) -> Self {
        self.files.push(name.to_string());
        self.text.insert(name.to_string(), text.to_string());
        self
    }

    /// Add a file without listing it (like the `.jres` resources).
    pub fn unlisted(mut self, name: &str, text: &str) -> Self {
        self.text.insert(name.to_string(), text.to_string());
        self
    }

    pub fn listed_only(mut self, name: &str) -> Self {
        self.files.push(name.to_string());
        self
    }

    pub fn palette(mut self, colors: &[&str]) -> Self {
        self.palette = Some(colors.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn dependency(mut self, name: &str, version: &str) -> Self {
        self.dependencies.insert(name.to_string(), serde_json::Value::String(version.to_string()));
        self
    }

    pub fn build(self) -> SourceProject {
        let entry = GameEntry { url: self.url, author: self.author };
        let config = ProjectConfig {
            dependencies: self.dependencies,
            files: self.files,
            palette: self.palette,
        };
        SourceProject::new(&entry, ScriptMeta::default(), self.text, config)
    }
}

/// A program with one tile module declaring `apple`.
pub fn tiled_project(author: &str, id: &str, main: &str) -> SourceProject {
    ProjectBuilder::new(author, id)
        .file("tilemap.g.ts", TILEMAP)
        .unlisted("tilemap.g.jres", TILEMAP_JRES)
        .file("main.ts", main)
        .build()
}
