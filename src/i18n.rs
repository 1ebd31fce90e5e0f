// UI label tables

use crate::models::Language;

/// Every user-facing label, in one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub placeholder: &'static str,
    pub add: &'static str,
    pub no_tasks: &'static str,
    pub footer: &'static str,
    pub copyright: &'static str,
    pub delete_confirm_title: &'static str,
    pub delete_confirm_description: &'static str,
    pub delete_confirm_cancel: &'static str,
    pub delete_confirm_action: &'static str,
    pub edit_title: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,
    pub set_time: &'static str,
    pub hour: &'static str,
    pub minute: &'static str,
}

const EN: Labels = Labels {
    title: "TaskMaster",
    placeholder: "Add a new task...",
    add: "Add",
    no_tasks: "No tasks yet. Add one to get started!",
    footer: "Thank you for using TaskMaster",
    copyright: "© 2025 TaskMaster. All rights reserved.",
    delete_confirm_title: "Are you sure?",
    delete_confirm_description: "This action cannot be undone. This will permanently delete your task.",
    delete_confirm_cancel: "Cancel",
    delete_confirm_action: "Delete",
    edit_title: "Edit Task",
    save: "Save",
    cancel: "Cancel",
    set_time: "Set time",
    hour: "Hour",
    minute: "Minute",
};

const AR: Labels = Labels {
    title: "تاسك ماستر",
    placeholder: "أضف مهمة جديدة...",
    add: "إضافة",
    no_tasks: "لا توجد مهام بعد. أضف واحدة للبدء!",
    footer: "شكراً لاستخدامك تاسك ماستر",
    copyright: "© 2025 تاسك ماستر. جميع الحقوق محفوظة.",
    delete_confirm_title: "هل أنت متأكد؟",
    delete_confirm_description: "لا يمكن التراجع عن هذا الإجراء. سيؤدي هذا إلى حذف مهمتك نهائياً.",
    delete_confirm_cancel: "إلغاء",
    delete_confirm_action: "حذف",
    edit_title: "تعديل المهمة",
    save: "حفظ",
    cancel: "إلغاء",
    set_time: "تحديد الوقت",
    hour: "الساعة",
    minute: "الدقيقة",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}
