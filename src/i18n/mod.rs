// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! English/Arabic string catalog.
//!
//! Static UI captions live in [`Label`]; notices and field errors carry their
//! parameters in [`Text`] / [`FieldError`] and are rendered per locale at view
//! time, so switching the locale re-localizes messages already on screen.

use serde::{Deserialize, Serialize};

use crate::models::field_errors::FieldError;

/// Supported UI locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Arabic is laid out right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }
}

/// Static captions used across the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    AppTitle,
    // Resources
    Actors,
    Directors,
    Genres,
    Languages,
    Maturity,
    Statuses,
    Ratings,
    Movies,
    // Fields
    NameEn,
    NameAr,
    BadgeColor,
    MaturityRating,
    Ranking,
    TitleEn,
    TitleAr,
    DescriptionEn,
    DescriptionAr,
    ImdbUrl,
    Duration,
    Status,
    Featured,
    Subtitles,
    Poster,
    Banner,
    // Actions
    AddRow,
    RemoveRow,
    SaveAll,
    Save,
    Cancel,
    Edit,
    Delete,
    DeleteSelected,
    Refresh,
    Export,
    Yes,
    No,
    Ok,
    NewMovie,
    ChooseFile,
    SelectAllOnPage,
    // Captions
    NewEntries,
    Existing,
    Search,
    PageSize,
    Previous,
    Next,
    NoRecords,
    Loading,
    ConfirmTitle,
    ErrorTitle,
    Theme,
    ThemeSystem,
    ThemeLight,
    ThemeDark,
    SwitchLanguage,
    NoneSelected,
    Working,
}

impl Label {
    /// Localized caption for this label.
    pub fn text(self, locale: Locale) -> &'static str {
        let (en, ar) = self.pair();
        match locale {
            Locale::En => en,
            Locale::Ar => ar,
        }
    }

    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Label::AppTitle => ("Catalog admin", "إدارة الكتالوج"),
            Label::Actors => ("Actors", "الممثلون"),
            Label::Directors => ("Directors", "المخرجون"),
            Label::Genres => ("Genres", "التصنيفات"),
            Label::Languages => ("Languages", "اللغات"),
            Label::Maturity => ("Maturity", "الفئات العمرية"),
            Label::Statuses => ("Statuses", "الحالات"),
            Label::Ratings => ("Ratings", "التقييمات"),
            Label::Movies => ("Movies", "الأفلام"),
            Label::NameEn => ("Name (English)", "الاسم (إنجليزي)"),
            Label::NameAr => ("Name (Arabic)", "الاسم (عربي)"),
            Label::BadgeColor => ("Badge color", "لون الشارة"),
            Label::MaturityRating => ("Maturity rating", "التصنيف العمري"),
            Label::Ranking => ("Ranking", "الترتيب"),
            Label::TitleEn => ("Title (English)", "العنوان (إنجليزي)"),
            Label::TitleAr => ("Title (Arabic)", "العنوان (عربي)"),
            Label::DescriptionEn => ("Description (English)", "الوصف (إنجليزي)"),
            Label::DescriptionAr => ("Description (Arabic)", "الوصف (عربي)"),
            Label::ImdbUrl => ("IMDb URL", "رابط IMDb"),
            Label::Duration => ("Duration (minutes)", "المدة (دقائق)"),
            Label::Status => ("Status", "الحالة"),
            Label::Featured => ("Featured", "مميز"),
            Label::Subtitles => ("Subtitles", "الترجمات"),
            Label::Poster => ("Poster", "الملصق"),
            Label::Banner => ("Banner", "اللافتة"),
            Label::AddRow => ("Add row", "إضافة صف"),
            Label::RemoveRow => ("Remove row", "حذف الصف"),
            Label::SaveAll => ("Save all", "حفظ الكل"),
            Label::Save => ("Save", "حفظ"),
            Label::Cancel => ("Cancel", "إلغاء"),
            Label::Edit => ("Edit", "تعديل"),
            Label::Delete => ("Delete", "حذف"),
            Label::DeleteSelected => ("Delete selected", "حذف المحدد"),
            Label::Refresh => ("Refresh", "تحديث"),
            Label::Export => ("Export spreadsheet", "تصدير جدول"),
            Label::Yes => ("Yes", "نعم"),
            Label::No => ("No", "لا"),
            Label::Ok => ("OK", "حسناً"),
            Label::NewMovie => ("New movie", "فيلم جديد"),
            Label::ChooseFile => ("Choose file", "اختيار ملف"),
            Label::SelectAllOnPage => ("Select page", "تحديد الصفحة"),
            Label::NewEntries => ("New entries", "إدخالات جديدة"),
            Label::Existing => ("Existing entries", "الإدخالات الحالية"),
            Label::Search => ("Search", "بحث"),
            Label::PageSize => ("Rows per page", "صفوف في الصفحة"),
            Label::Previous => ("Previous", "السابق"),
            Label::Next => ("Next", "التالي"),
            Label::NoRecords => ("No records found.", "لا توجد سجلات."),
            Label::Loading => ("Loading…", "جارٍ التحميل…"),
            Label::ConfirmTitle => ("Please confirm", "يرجى التأكيد"),
            Label::ErrorTitle => ("Something went wrong", "حدث خطأ"),
            Label::Theme => ("Theme", "المظهر"),
            Label::ThemeSystem => ("System", "النظام"),
            Label::ThemeLight => ("Light", "فاتح"),
            Label::ThemeDark => ("Dark", "داكن"),
            Label::SwitchLanguage => ("العربية", "English"),
            Label::NoneSelected => ("None", "لا شيء"),
            Label::Working => ("working", "قيد التنفيذ"),
        }
    }
}

/// Parameterised user-facing notices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Text {
    MaxRows(usize),
    FixHighlighted,
    Created(usize),
    CreateFailed(usize),
    Updated,
    UpdateFailed(String),
    Deleted,
    DeleteFailed(String),
    BatchDeleted(usize),
    BatchDeleteFailed { failed: usize, total: usize },
    NothingSelected,
    LoadFailed(String),
    ConfirmDelete(String),
    ConfirmDeleteMany(usize),
    MovieSaved,
    MovieSaveFailed(String),
    OptionsFailed(String),
    ImageRejected,
    Exported(String),
    ExportFailed(String),
    ExportCancelled,
    NothingToExport,
}

impl Text {
    /// Render the notice for the given locale.
    pub fn render(&self, locale: Locale) -> String {
        match (self, locale) {
            (Text::MaxRows(max), Locale::En) => format!("You can add at most {max} rows at once."),
            (Text::MaxRows(max), Locale::Ar) => format!("يمكنك إضافة {max} صفوف كحد أقصى في المرة الواحدة."),
            (Text::FixHighlighted, Locale::En) => "Please fix the highlighted fields.".into(),
            (Text::FixHighlighted, Locale::Ar) => "يرجى تصحيح الحقول المحددة.".into(),
            (Text::Created(n), Locale::En) => format!("{n} record(s) added successfully."),
            (Text::Created(n), Locale::Ar) => format!("تمت إضافة {n} سجل بنجاح."),
            (Text::CreateFailed(n), Locale::En) => {
                format!("{n} record(s) could not be added. Fix them and save again.")
            }
            (Text::CreateFailed(n), Locale::Ar) => {
                format!("تعذرت إضافة {n} سجل. صححها ثم احفظ مرة أخرى.")
            }
            (Text::Updated, Locale::En) => "Record updated.".into(),
            (Text::Updated, Locale::Ar) => "تم تحديث السجل.".into(),
            (Text::UpdateFailed(err), Locale::En) => format!("Update failed: {err}"),
            (Text::UpdateFailed(err), Locale::Ar) => format!("فشل التحديث: {err}"),
            (Text::Deleted, Locale::En) => "Record deleted.".into(),
            (Text::Deleted, Locale::Ar) => "تم حذف السجل.".into(),
            (Text::DeleteFailed(err), Locale::En) => format!("Delete failed: {err}"),
            (Text::DeleteFailed(err), Locale::Ar) => format!("فشل الحذف: {err}"),
            (Text::BatchDeleted(n), Locale::En) => format!("{n} record(s) deleted."),
            (Text::BatchDeleted(n), Locale::Ar) => format!("تم حذف {n} سجل."),
            (Text::BatchDeleteFailed { failed, total }, Locale::En) => format!(
                "Deleting the selection failed ({failed} of {total} requests). Refresh to see the current state."
            ),
            (Text::BatchDeleteFailed { failed, total }, Locale::Ar) => format!(
                "فشل حذف العناصر المحددة ({failed} من {total} طلبات). قم بالتحديث لعرض الحالة الحالية."
            ),
            (Text::NothingSelected, Locale::En) => "No rows selected.".into(),
            (Text::NothingSelected, Locale::Ar) => "لم يتم تحديد أي صف.".into(),
            (Text::LoadFailed(err), Locale::En) => format!("Could not load records: {err}"),
            (Text::LoadFailed(err), Locale::Ar) => format!("تعذر تحميل السجلات: {err}"),
            (Text::ConfirmDelete(name), Locale::En) => format!("Delete \"{name}\"?"),
            (Text::ConfirmDelete(name), Locale::Ar) => format!("حذف \"{name}\"؟"),
            (Text::ConfirmDeleteMany(n), Locale::En) => format!("Delete {n} selected record(s)?"),
            (Text::ConfirmDeleteMany(n), Locale::Ar) => format!("حذف {n} من السجلات المحددة؟"),
            (Text::MovieSaved, Locale::En) => "Movie saved.".into(),
            (Text::MovieSaved, Locale::Ar) => "تم حفظ الفيلم.".into(),
            (Text::MovieSaveFailed(err), Locale::En) => format!("Saving the movie failed: {err}"),
            (Text::MovieSaveFailed(err), Locale::Ar) => format!("فشل حفظ الفيلم: {err}"),
            (Text::OptionsFailed(err), Locale::En) => format!("Could not load movie options: {err}"),
            (Text::OptionsFailed(err), Locale::Ar) => format!("تعذر تحميل خيارات الفيلم: {err}"),
            (Text::ImageRejected, Locale::En) => "The selected image does not meet the requirements.".into(),
            (Text::ImageRejected, Locale::Ar) => "الصورة المختارة لا تستوفي المتطلبات.".into(),
            (Text::Exported(path), Locale::En) => format!("Spreadsheet saved: {path}"),
            (Text::Exported(path), Locale::Ar) => format!("تم حفظ الجدول: {path}"),
            (Text::ExportFailed(err), Locale::En) => format!("Export failed: {err}"),
            (Text::ExportFailed(err), Locale::Ar) => format!("فشل التصدير: {err}"),
            (Text::ExportCancelled, Locale::En) => "Export cancelled.".into(),
            (Text::ExportCancelled, Locale::Ar) => "تم إلغاء التصدير.".into(),
            (Text::NothingToExport, Locale::En) => "There is nothing to export.".into(),
            (Text::NothingToExport, Locale::Ar) => "لا يوجد ما يمكن تصديره.".into(),
        }
    }
}

impl FieldError {
    /// Inline message shown under an invalid field.
    pub fn render(&self, locale: Locale) -> String {
        match (self, locale) {
            (FieldError::Required, Locale::En) => "This field is required.".into(),
            (FieldError::Required, Locale::Ar) => "هذا الحقل مطلوب.".into(),
            (FieldError::InvalidInteger, Locale::En) => "Enter a whole number.".into(),
            (FieldError::InvalidInteger, Locale::Ar) => "أدخل رقماً صحيحاً.".into(),
            (FieldError::OutOfRange { min, max }, Locale::En) => {
                format!("Enter a value between {min} and {max}.")
            }
            (FieldError::OutOfRange { min, max }, Locale::Ar) => {
                format!("أدخل قيمة بين {min} و {max}.")
            }
            (FieldError::InvalidImdbUrl, Locale::En) => {
                "Enter an IMDb title link, e.g. https://www.imdb.com/title/tt0111161/".into()
            }
            (FieldError::InvalidImdbUrl, Locale::Ar) => {
                "أدخل رابط عنوان من IMDb، مثل https://www.imdb.com/title/tt0111161/".into()
            }
            (FieldError::InvalidColor, Locale::En) => "Use a color like #1E90FF.".into(),
            (FieldError::InvalidColor, Locale::Ar) => "استخدم لوناً مثل ‎#1E90FF.".into(),
            (FieldError::SelectAtLeastOne, Locale::En) => "Select at least one option.".into(),
            (FieldError::SelectAtLeastOne, Locale::Ar) => "اختر خياراً واحداً على الأقل.".into(),
            (FieldError::ImageWidth { expected, actual }, Locale::En) => {
                format!("Image must be {expected}px wide (got {actual}px).")
            }
            (FieldError::ImageWidth { expected, actual }, Locale::Ar) => {
                format!("يجب أن يكون عرض الصورة {expected} بكسل (العرض الحالي {actual}).")
            }
            (FieldError::ImageHeight { min, max, actual }, Locale::En) if min == max => {
                format!("Image must be {min}px tall (got {actual}px).")
            }
            (FieldError::ImageHeight { min, max, actual }, Locale::En) => {
                format!("Image height must be between {min}px and {max}px (got {actual}px).")
            }
            (FieldError::ImageHeight { min, max, actual }, Locale::Ar) => {
                format!("يجب أن يكون ارتفاع الصورة بين {min} و {max} بكسل (الارتفاع الحالي {actual}).")
            }
            (FieldError::ImageTooLarge { max_bytes }, Locale::En) => {
                format!("Image must not exceed {} KB.", max_bytes / 1024)
            }
            (FieldError::ImageTooLarge { max_bytes }, Locale::Ar) => {
                format!("يجب ألا يتجاوز حجم الصورة {} كيلوبايت.", max_bytes / 1024)
            }
            (FieldError::ImageUnreadable, Locale::En) => "The file is not a readable image.".into(),
            (FieldError::ImageUnreadable, Locale::Ar) => "الملف ليس صورة صالحة.".into(),
            (FieldError::AlreadyTaken, Locale::En) => "This value already exists.".into(),
            (FieldError::AlreadyTaken, Locale::Ar) => "هذه القيمة موجودة بالفعل.".into(),
            (FieldError::Server(message), _) => message.clone(),
            (FieldError::RequestFailed(err), Locale::En) => format!("Request failed: {err}"),
            (FieldError::RequestFailed(err), Locale::Ar) => format!("فشل الطلب: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_interpolated_in_both_locales() {
        let text = Text::Created(2);
        assert_eq!(text.render(Locale::En), "2 record(s) added successfully.");
        assert!(text.render(Locale::Ar).contains('2'));
    }

    #[test]
    fn locale_serializes_as_code() {
        let json = serde_json::to_string(&Locale::Ar).unwrap();
        assert_eq!(json, "\"ar\"");
        assert_eq!(Locale::Ar.code(), "ar");
        assert!(Locale::Ar.is_rtl());
        assert_eq!(Locale::Ar.toggled(), Locale::En);
    }

    #[test]
    fn server_messages_pass_through_verbatim() {
        let err = FieldError::Server("must be unique per language".into());
        assert_eq!(err.render(Locale::Ar), "must be unique per language");
    }
}
