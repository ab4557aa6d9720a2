/// Built-in reconciliation report layout
pub const RECONCILIATION_TEMPLATE: &str = r#"{{title}}
==============================
Generated:   {{generated_at}}
SoC block:   {{block_name}}
Directory:   {{target_dir}}
Golden list: {{golden_list}}
SHA-256:     {{golden_fingerprint}}

Expected names: {{counts.expected}}
Actual names:   {{counts.actual}} ({{counts.files_scanned}} files)
Matched:        {{counts.matched}}
Missing:        {{counts.missing}}
Extra:          {{counts.extra}}

Matched ({{counts.matched}})
------------------------------
{{#each matched}}
{{name}}
{{#each paths}}
    {{this}}
{{/each}}
{{else}}
(none)
{{/each}}

Missing ({{counts.missing}})
------------------------------
{{#each missing}}
{{name}}
{{else}}
(none)
{{/each}}

Extra ({{counts.extra}})
------------------------------
{{#each extra}}
{{name}}
{{#each paths}}
    {{this}}
{{/each}}
{{else}}
(none)
{{/each}}
"#;

/// Built-in directory file list layout
pub const FILE_LIST_TEMPLATE: &str = r#"{{title}}
==============================
Generated: {{generated_at}}
Root:      {{root}}
Files:     {{count}}

{{#each paths}}
{{this}}
{{/each}}
"#;

/// Built-in expanded golden list layout
pub const EXPANDED_LIST_TEMPLATE: &str = r#"{{title}}
==============================
Generated:   {{generated_at}}
SoC block:   {{block_name}}
Golden list: {{golden_list}}
SHA-256:     {{golden_fingerprint}}
Names:       {{count}}

{{#each names}}
{{this}}
{{/each}}
"#;
