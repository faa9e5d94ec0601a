//! 履歴書アップロードコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで1ファイルだけ選択する。
//! 複数渡された場合は対応形式の最初の1件を採用する。

use leptos::html::Input;
use leptos::prelude::*;
use resume_score_common::{accept_attribute, DocumentKind, ValidationError};
use web_sys::{DragEvent, FileList};
use crate::app::SelectedDocument;

#[component]
pub fn FileUpload<FS, FR>(
    /// 選択中のファイル名
    #[prop(into)] file_name: Signal<Option<String>>,
    on_select: FS,
    on_reject: FR,
) -> impl IntoView
where
    FS: Fn(SelectedDocument) + 'static + Clone,
    FR: Fn(ValidationError) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let handle_files = move |files: FileList| match pick_document(&files) {
        Some(Ok(document)) => on_select(document),
        Some(Err(e)) => on_reject(e),
        None => {}
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // 同じファイルを選び直しても change を発火させる
        input.set_value("");
    };

    let has_file = move || file_name.with(Option::is_some);

    view! {
        <div class="file-upload">
            <div
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if has_file() {
                        classes.push("has-file");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <div class="upload-icon">"📄"</div>
                <p class="upload-title">
                    {move || match file_name.get() {
                        Some(name) => name,
                        None if is_dragover.get() => "Drop your resume here".to_string(),
                        None => "Upload Resume".to_string(),
                    }}
                </p>
                <p class="text-muted">
                    {move || if has_file() {
                        "Click or drop another file to replace"
                    } else {
                        "Drag & drop or click to select a file"
                    }}
                </p>
                <p class="text-muted">"PDF, DOCX or DOC"</p>
            </div>
            <input
                type="file"
                class="hidden-input"
                accept=accept_attribute()
                node_ref=input_ref
                on:change=on_change
            />
        </div>
    }
}

fn pick_document(files: &FileList) -> Option<Result<SelectedDocument, ValidationError>> {
    let candidates = (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| {
            let name = file.name();
            let mime = file.type_();
            (file, name, mime)
        });

    first_supported(candidates).map(|picked| {
        picked.map(|(file, name, kind)| SelectedDocument { name, kind, file })
    })
}

/// 対応形式の最初の1件を返す。1件もなければ最初の拒否理由。
pub(crate) fn first_supported<T>(
    candidates: impl IntoIterator<Item = (T, String, String)>,
) -> Option<Result<(T, String, DocumentKind), ValidationError>> {
    let mut rejected = None;
    for (item, name, mime) in candidates {
        match DocumentKind::detect(&name, Some(&mime)) {
            Ok(kind) => return Some(Ok((item, name, kind))),
            Err(e) => {
                rejected.get_or_insert(e);
            }
        }
    }
    rejected.map(Err)
}
