use dioxus::prelude::*;
use shared_types::LanguageType;

/// Hello-world skeleton shown when the editor switches language.
pub fn starter_code(language: LanguageType) -> &'static str {
    match language {
        LanguageType::Java => "public class Solution {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}\n",
        LanguageType::C => "#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}\n",
        LanguageType::Cpp => "#include <iostream>\n\nint main() {\n    std::cout << \"Hello, World!\" << std::endl;\n    return 0;\n}\n",
        LanguageType::Python => "# Your code here\nprint(\"Hello, World!\")\n",
        LanguageType::Javascript | LanguageType::Typescript => "console.log(\"Hello, World!\");\n",
        LanguageType::Sql => "-- Your SQL query here\nSELECT 'Hello, World!' AS greeting;\n",
        LanguageType::Rust => "fn main() {\n    println!(\"Hello, World!\");\n}\n",
        LanguageType::Golang => "package main\n\nimport \"fmt\"\n\nfunc main() {\n    fmt.Println(\"Hello, World!\")\n}\n",
        _ => "",
    }
}

/// Plain monospace editor bound to a signal.
#[component]
pub fn CodeEditor(mut code: Signal<String>, #[props(default = 18)] rows: u32) -> Element {
    rsx! {
        textarea {
            class: "code-editor",
            spellcheck: "false",
            rows: "{rows}",
            value: "{code}",
            oninput: move |evt: FormEvent| code.set(evt.value()),
        }
    }
}

#[component]
pub fn LanguageSelect(mut language: Signal<LanguageType>, #[props(default)] disabled: bool) -> Element {
    rsx! {
        select {
            class: "form-select",
            disabled,
            value: "{language().as_str()}",
            onchange: move |evt: FormEvent| {
                if let Some(lang) = LanguageType::parse(&evt.value()) {
                    language.set(lang);
                }
            },
            for lang in LanguageType::ALL {
                option {
                    value: "{lang.as_str()}",
                    selected: lang == language(),
                    "{lang}"
                }
            }
        }
    }
}
