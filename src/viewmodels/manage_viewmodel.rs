// ============================================================================
// MANAGE VIEWMODEL - Admin course entry (manual form + spreadsheet upload)
// ============================================================================

use super::{LookupsViewModel, SubmitError};
use crate::hooks::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::{Ack, LookupId, LookupItem, NewCourse, UploadFile};
use crate::services::{endpoints, LocalFuture, RequestBody};
use crate::state::{AppContext, ReactiveState};
use crate::utils::validation::{has_upload_extension, is_valid_link};
use crate::utils::FieldErrors;

pub const ADMIN_ONLY: &str = "Only administrators can manage courses";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type. Use .xlsx, .xls or .csv";
pub const INACTIVE_TAB: &str = "This form is not open";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManageTab {
    #[default]
    AddCourse,
    Upload,
}

impl ManageTab {
    pub fn name(&self) -> &'static str {
        match self {
            ManageTab::AddCourse => "addCourse",
            ManageTab::Upload => "upload",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "addCourse" => Some(ManageTab::AddCourse),
            "upload" => Some(ManageTab::Upload),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    University,
    Field,
    Specialization,
    Level,
    Duration,
    Link,
}

impl CourseField {
    /// Form input name, same keys as the inline errors
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "name" => CourseField::Name,
            "universityId" => CourseField::University,
            "fieldId" => CourseField::Field,
            "specializationId" => CourseField::Specialization,
            "level" => CourseField::Level,
            "duration" => CourseField::Duration,
            "link" => CourseField::Link,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseForm {
    pub name: String,
    pub university_id: Option<LookupId>,
    pub field_id: Option<LookupId>,
    pub specialization_id: Option<LookupId>,
    pub level: Option<String>,
    pub duration: Option<String>,
    pub link: String,
}

impl CourseForm {
    /// Every field is required; the link must be an http(s) URL
    pub fn validate(&self) -> Result<NewCourse, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Course name required");
        let university_id = required_id(&mut errors, "universityId", &self.university_id, "University required");
        let field_id = required_id(&mut errors, "fieldId", &self.field_id, "Field of study required");
        let specialization_id = required_id(
            &mut errors,
            "specializationId",
            &self.specialization_id,
            "Specialization required",
        );
        let level = self.level.clone().unwrap_or_default();
        errors.require("level", &level, "Level required");
        let duration = self.duration.clone().unwrap_or_default();
        errors.require("duration", &duration, "Duration required");
        if errors.require("link", &self.link, "Course link required") && !is_valid_link(&self.link) {
            errors.add("link", "Link must start with http:// or https://");
        }

        errors.into_result()?;
        match (university_id, field_id, specialization_id) {
            (Some(university_id), Some(field_id), Some(specialization_id)) => Ok(NewCourse {
                name: self.name.trim().to_string(),
                university_id,
                field_id,
                specialization_id,
                level,
                duration,
                link: self.link.trim().to_string(),
            }),
            _ => Err(FieldErrors::new()),
        }
    }
}

fn required_id(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Option<LookupId>,
    message: &str,
) -> Option<LookupId> {
    match value.as_ref().filter(|id| !id.is_blank()) {
        Some(id) => Some(id.clone()),
        None => {
            errors.add(field, message);
            None
        }
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManageState {
    pub tab: ManageTab,
    pub form: CourseForm,
    /// Shown after a submit attempt
    pub errors: FieldErrors,
    pub selected_file: Option<UploadFile>,
    pub file_error: Option<String>,
}

#[derive(Clone)]
pub struct ManageViewModel {
    ctx: AppContext,
    lookups: LookupsViewModel,
    add: UseFetchHandle<Ack>,
    upload: UseFetchHandle<Ack>,
    pub state: ReactiveState<ManageState>,
}

impl ManageViewModel {
    pub fn new(ctx: &AppContext, lookups: LookupsViewModel) -> Self {
        let state = ReactiveState::<ManageState>::default();
        ctx.watch(&state);
        Self {
            ctx: ctx.clone(),
            lookups,
            add: use_fetch(ctx, endpoints::COURSE_ADD, false),
            upload: use_fetch(ctx, endpoints::COURSE_UPLOAD, false),
            state,
        }
    }

    pub fn mount(&self) -> LocalFuture<Result<(), String>> {
        self.lookups.ensure_catalog()
    }

    pub fn select_tab(&self, tab: ManageTab) {
        self.state.update(|state| state.tab = tab);
    }

    /// Updates one form field from its raw input value. Changing the field of
    /// study clears the specialization and loads the new field's list.
    pub fn set_field(&self, field: CourseField, raw: &str) -> Option<LocalFuture<Result<(), String>>> {
        let id = LookupId::parse(raw);
        self.state.update(|state| {
            let form = &mut state.form;
            match field {
                CourseField::Name => form.name = raw.to_string(),
                CourseField::University => form.university_id = id.clone(),
                CourseField::Field => {
                    form.field_id = id.clone();
                    form.specialization_id = None;
                }
                CourseField::Specialization => form.specialization_id = id.clone(),
                CourseField::Level => form.level = optional_text(raw),
                CourseField::Duration => form.duration = optional_text(raw),
                CourseField::Link => form.link = raw.to_string(),
            }
        });

        match (field, id) {
            (CourseField::Field, Some(field_id)) => Some(self.lookups.ensure_specializations(&field_id)),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.state.with(|state| state.form.validate().is_ok())
    }

    pub fn visible_specializations(&self) -> Vec<LookupItem> {
        let field_id = self.state.with(|state| state.form.field_id.clone());
        self.lookups.visible_specializations(field_id.as_ref())
    }

    pub async fn add_course(&self) -> Result<(), SubmitError> {
        self.require_tab(ManageTab::AddCourse)?;
        self.require_admin()?;

        let course = match self.state.with(|state| state.form.validate()) {
            Ok(course) => course,
            Err(errors) => {
                self.state.update(|state| state.errors = errors.clone());
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.state.update(|state| state.errors = FieldErrors::new());

        log::info!("➕ [MANAGE] Adding course {}", course.name);
        match self.add.fetch_json(&course, None).await {
            FetchOutcome::Data(_) => {
                self.ctx.notices.success("Course added");
                self.state.update(|state| state.form = CourseForm::default());
                Ok(())
            }
            FetchOutcome::Error(message) => Err(self.failed(message)),
            FetchOutcome::Superseded => Ok(()),
        }
    }

    /// First upload step. Rejects files the import does not understand.
    pub fn select_file(&self, file: UploadFile) -> Result<(), String> {
        if !has_upload_extension(&file.file_name) {
            self.state.update(|state| {
                state.selected_file = None;
                state.file_error = Some(UNSUPPORTED_FILE.to_string());
            });
            return Err(UNSUPPORTED_FILE.to_string());
        }
        log::info!("📎 [MANAGE] Selected {} ({} bytes)", file.file_name, file.bytes.len());
        self.state.update(|state| {
            state.selected_file = Some(file);
            state.file_error = None;
        });
        Ok(())
    }

    /// Second upload step: sends the selected file as multipart `file`
    pub async fn submit_upload(&self) -> Result<(), SubmitError> {
        self.require_tab(ManageTab::Upload)?;
        self.require_admin()?;
        let Some(file) = self.state.with(|state| state.selected_file.clone()) else {
            return Err(SubmitError::Failed("Choose a file first".to_string()));
        };

        log::info!("📤 [MANAGE] Uploading {}", file.file_name);
        match self.upload.fetch_data(Some(RequestBody::Multipart(file)), None).await {
            FetchOutcome::Data(_) => {
                self.ctx.notices.success("Upload completed");
                self.state.update(|state| state.selected_file = None);
                Ok(())
            }
            FetchOutcome::Error(message) => Err(self.failed(message)),
            FetchOutcome::Superseded => Ok(()),
        }
    }

    pub fn submitting(&self) -> bool {
        self.add.loading() || self.upload.loading()
    }

    pub fn tab(&self) -> ManageTab {
        self.state.with(|state| state.tab)
    }

    /// The two tabs are exclusive: only the open one may submit
    fn require_tab(&self, tab: ManageTab) -> Result<(), SubmitError> {
        if self.tab() == tab {
            return Ok(());
        }
        log::warn!("🚫 [MANAGE] {:?} submit while {:?} is open", tab, self.tab());
        Err(SubmitError::Failed(INACTIVE_TAB.to_string()))
    }

    fn require_admin(&self) -> Result<(), SubmitError> {
        if self.ctx.auth.is_admin() {
            return Ok(());
        }
        self.ctx.notices.error(ADMIN_ONLY);
        Err(SubmitError::Failed(ADMIN_ONLY.to_string()))
    }

    fn failed(&self, message: String) -> SubmitError {
        self.ctx.notices.error(&message);
        SubmitError::Failed(message)
    }
}
