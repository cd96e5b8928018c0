// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tabled::Tabled;

use crate::error::Result;

use super::Status;

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Game {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(skip)]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) description: String,
    #[tabled(skip)]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) requirements: String,
    #[tabled(skip)]
    #[serde(default)]
    pub(crate) preview_image_url: Option<String>,
    #[tabled(skip)]
    #[serde(default)]
    pub(crate) apk_file_url: Option<String>,
    #[tabled(rename = "Leaderboard")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) support_leaderboard: bool,
    #[tabled(rename = "Points")]
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub(crate) support_points: bool,
    #[tabled(rename = "Status")]
    pub(crate) status: Status,
    #[tabled(rename = "Developer", display_with = "super::display_option")]
    #[serde(default)]
    pub(crate) developer_id: Option<u64>,
    #[tabled(skip)]
    #[serde(default)]
    pub(crate) api_key_message: Option<String>,
}

/// The fields of the upload and edit forms. Sent as multipart because the
/// preview image travels with them.
#[derive(Clone, Debug, Default)]
pub(crate) struct GameForm {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) requirements: String,
    pub(crate) apk_file_url: String,
    pub(crate) support_leaderboard: bool,
    pub(crate) support_points: bool,
    pub(crate) preview_image: Option<PathBuf>,
}

impl GameForm {
    pub(crate) async fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("description", self.description)
            .text("requirements", self.requirements)
            .text("apkFileUrl", self.apk_file_url)
            .text("supportLeaderboard", self.support_leaderboard.to_string())
            .text("supportPoints", self.support_points.to_string());

        if let Some(path) = self.preview_image {
            let file_name = path
                .file_name()
                .map_or_else(|| "preview".to_owned(), |name| name.to_string_lossy().into_owned());
            let bytes = tokio::fs::read(&path).await?;
            form = form.part("previewImage", Part::bytes(bytes).file_name(file_name));
        }

        Ok(form)
    }
}
