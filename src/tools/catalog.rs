//! Static tool catalog.
//!
//! Two declarative tables drive the whole tool surface:
//!
//! - [`NETWORK_TOOLS`]: per-tool projection specs — HTTP method, path
//!   template, which argument fields are required, which are optional, and
//!   an optional human-readable success label. The router copies required
//!   fields verbatim and optional fields only when present; nothing else
//!   about a network tool is hand-written.
//! - [`definitions`]: the JSON-schema descriptions served by `tools/list`.
//!
//! The two tables must agree: every schema `required` list matches the
//! projection spec's required fields. A test pins this.

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::HttpMethod;

/// Name of the local knowledge base tool. It never contacts the upstream.
pub const KNOWLEDGE_BASE_TOOL: &str = "knowledge_base";

/// Declarative projection spec for one network-backed tool.
pub struct ToolSpec {
    /// Unique tool name.
    pub name: &'static str,
    /// Upstream HTTP method.
    pub method: HttpMethod,
    /// Upstream path template relative to the base URL. `{field}` segments
    /// are substituted from same-named (required) argument fields.
    pub path: &'static str,
    /// Fields that must be present in the arguments.
    pub required: &'static [&'static str],
    /// Fields copied into the payload only when present.
    pub optional: &'static [&'static str],
    /// Success label merged as `message` into 2xx response bodies.
    pub success_label: Option<&'static str>,
}

/// Projection table for every network-backed tool.
///
/// Field names map 1:1 to the upstream contract — the adapter never
/// renames anything.
pub const NETWORK_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_catalogs",
        method: HttpMethod::Get,
        path: "/catalogs",
        required: &[],
        optional: &["category"],
        success_label: None,
    },
    ToolSpec {
        name: "list_mockups",
        method: HttpMethod::Get,
        path: "/mockups",
        required: &[],
        optional: &["collection_uuid"],
        success_label: None,
    },
    ToolSpec {
        name: "get_mockup",
        method: HttpMethod::Get,
        path: "/mockups/{mockup_uuid}",
        required: &["mockup_uuid"],
        optional: &[],
        success_label: None,
    },
    ToolSpec {
        name: "list_collections",
        method: HttpMethod::Get,
        path: "/collections",
        required: &[],
        optional: &[],
        success_label: None,
    },
    ToolSpec {
        name: "create_collection",
        method: HttpMethod::Post,
        path: "/collections",
        required: &["name"],
        optional: &[],
        success_label: Some("Collection created"),
    },
    ToolSpec {
        name: "add_mockup_to_collection",
        method: HttpMethod::Post,
        path: "/collections/{collection_uuid}/mockups",
        required: &["collection_uuid", "mockup_uuid"],
        optional: &[],
        success_label: Some("Mockup added to collection"),
    },
    ToolSpec {
        name: "render_mockup",
        method: HttpMethod::Post,
        path: "/renders",
        required: &["mockup_uuid", "smart_objects"],
        optional: &["export_label", "export_options"],
        success_label: Some("Render queued"),
    },
    ToolSpec {
        name: "render_batch",
        method: HttpMethod::Post,
        path: "/renders/bulk",
        required: &["renders"],
        optional: &["export_options"],
        success_label: Some("Batch render queued"),
    },
    ToolSpec {
        name: "get_render_status",
        method: HttpMethod::Get,
        path: "/renders/{render_uuid}",
        required: &["render_uuid"],
        optional: &[],
        success_label: None,
    },
    ToolSpec {
        name: "export_print_files",
        method: HttpMethod::Post,
        path: "/print-files",
        required: &["mockup_uuid", "smart_objects"],
        optional: &["export_options"],
        success_label: Some("Print file export queued"),
    },
    ToolSpec {
        name: "upload_psd",
        method: HttpMethod::Post,
        path: "/psd/upload",
        required: &["psd_url"],
        optional: &["psd_category_id", "collection_uuid"],
        success_label: Some("PSD upload accepted"),
    },
    ToolSpec {
        name: "delete_psd",
        method: HttpMethod::Delete,
        path: "/psd/{mockup_uuid}",
        required: &["mockup_uuid"],
        optional: &[],
        success_label: Some("PSD template deleted"),
    },
    ToolSpec {
        name: "list_psd_categories",
        method: HttpMethod::Get,
        path: "/psd/categories",
        required: &[],
        optional: &[],
        success_label: None,
    },
];

/// Looks up the projection spec for a network tool.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    NETWORK_TOOLS.iter().find(|spec| spec.name == name)
}

/// A tool definition for the tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// JSON schema fragment shared by every render-style smart object array.
fn smart_objects_schema() -> Value {
    json!({
        "type": "array",
        "description": "One entry per smart object to fill. Smart objects not listed \
                        render with the template's default content.",
        "items": {
            "type": "object",
            "properties": {
                "uuid": {
                    "type": "string",
                    "description": "Smart object UUID (from get_mockup)"
                },
                "asset": {
                    "type": "object",
                    "description": "Artwork to composite into this smart object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "Publicly reachable URL of the design asset"
                        }
                    },
                    "required": ["url"]
                },
                "color": {
                    "type": "string",
                    "description": "Optional: hex colour fill (e.g. '#1a1a1a')"
                },
                "print_area_preset_uuid": {
                    "type": "string",
                    "description": "Optional: print-area preset to place the asset with"
                }
            },
            "required": ["uuid"]
        }
    })
}

/// JSON schema fragment for export options.
fn export_options_schema() -> Value {
    json!({
        "type": "object",
        "description": "Optional output settings. Omit for webp at native size.",
        "properties": {
            "image_format": {
                "type": "string",
                "enum": ["webp", "png", "jpg"],
                "description": "Output image format (default: webp)"
            },
            "image_size": {
                "type": "integer",
                "description": "Output width in pixels, up to the template's native size"
            },
            "mode": {
                "type": "string",
                "enum": ["view", "download"],
                "description": "'view' returns a temporary preview URL, 'download' a persistent one"
            }
        }
    })
}

/// Returns the full list of tool definitions served by `tools/list`.
///
/// Identical across sessions for the process lifetime.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        // === Browsing ===
        ToolDefinition {
            name: "list_catalogs".to_string(),
            description: Some(
                "List the public mockup template catalogs (apparel, prints, devices, \
                 packaging, ...). Use the optional category filter to narrow the list. \
                 Catalog entries reference mockup templates that can be rendered \
                 directly."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Optional: only return catalogs in this category"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "list_mockups".to_string(),
            description: Some(
                "List the mockup templates in your workspace, including templates \
                 created from uploaded PSDs. Each entry carries the template UUID \
                 needed for rendering."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "collection_uuid": {
                        "type": "string",
                        "description": "Optional: only return mockups in this collection"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "get_mockup".to_string(),
            description: Some(
                "Fetch one mockup template with its smart objects: the placeholder \
                 regions where artwork is composited, each with its UUID, dimensions, \
                 and print-area presets. Call this before render_mockup to learn which \
                 smart object UUIDs to fill."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mockup_uuid": {
                        "type": "string",
                        "description": "UUID of the mockup template"
                    }
                },
                "required": ["mockup_uuid"]
            }),
        },
        // === Collections ===
        ToolDefinition {
            name: "list_collections".to_string(),
            description: Some(
                "List your mockup collections. Collections group templates for \
                 organisation and for filtering list_mockups.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "create_collection".to_string(),
            description: Some("Create a new, empty mockup collection.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Display name for the collection"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "add_mockup_to_collection".to_string(),
            description: Some(
                "Add an existing mockup template to a collection.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "collection_uuid": {
                        "type": "string",
                        "description": "UUID of the target collection"
                    },
                    "mockup_uuid": {
                        "type": "string",
                        "description": "UUID of the mockup template to add"
                    }
                },
                "required": ["collection_uuid", "mockup_uuid"]
            }),
        },
        // === Rendering ===
        ToolDefinition {
            name: "render_mockup".to_string(),
            description: Some(
                "Render one mockup template with your artwork composited into its \
                 smart objects. Returns the export URL(s) for the rendered image. \
                 Rendering happens upstream and can take tens of seconds for complex \
                 scenes."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mockup_uuid": {
                        "type": "string",
                        "description": "UUID of the mockup template to render"
                    },
                    "smart_objects": smart_objects_schema(),
                    "export_label": {
                        "type": "string",
                        "description": "Optional: label attached to the render for later lookup"
                    },
                    "export_options": export_options_schema()
                },
                "required": ["mockup_uuid", "smart_objects"]
            }),
        },
        ToolDefinition {
            name: "render_batch".to_string(),
            description: Some(
                "Queue many renders in one call. Entries are processed independently \
                 and in no guaranteed order; the upstream decides scheduling. Returns \
                 one render UUID per entry — poll get_render_status for results. \
                 Prefer several small batches over one huge one."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "renders": {
                        "type": "array",
                        "description": "Render requests, each shaped like a render_mockup call",
                        "items": {
                            "type": "object",
                            "properties": {
                                "mockup_uuid": {
                                    "type": "string",
                                    "description": "UUID of the mockup template to render"
                                },
                                "smart_objects": smart_objects_schema(),
                                "export_label": {
                                    "type": "string",
                                    "description": "Optional: label attached to this render"
                                }
                            },
                            "required": ["mockup_uuid", "smart_objects"]
                        }
                    },
                    "export_options": export_options_schema()
                },
                "required": ["renders"]
            }),
        },
        ToolDefinition {
            name: "get_render_status".to_string(),
            description: Some(
                "Fetch the status and, once finished, the export URLs of a queued \
                 render (from render_mockup or render_batch).".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "render_uuid": {
                        "type": "string",
                        "description": "UUID of the render to inspect"
                    }
                },
                "required": ["render_uuid"]
            }),
        },
        ToolDefinition {
            name: "export_print_files".to_string(),
            description: Some(
                "Produce production-ready print files for a mockup: print-resolution \
                 output of each smart object's artwork without the mockup scene, \
                 honouring print-area preset dimensions."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mockup_uuid": {
                        "type": "string",
                        "description": "UUID of the mockup template"
                    },
                    "smart_objects": smart_objects_schema(),
                    "export_options": export_options_schema()
                },
                "required": ["mockup_uuid", "smart_objects"]
            }),
        },
        // === PSD Templates ===
        ToolDefinition {
            name: "upload_psd".to_string(),
            description: Some(
                "Create a renderable mockup template from your own Photoshop file. \
                 The PSD must be reachable at a public URL, use RGB colour, and \
                 contain at least one smart object layer. Processing is asynchronous; \
                 the template appears in list_mockups when ready."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "psd_url": {
                        "type": "string",
                        "description": "Publicly reachable URL of the .psd file"
                    },
                    "psd_category_id": {
                        "type": "integer",
                        "description": "Optional: category to file the template under"
                    },
                    "collection_uuid": {
                        "type": "string",
                        "description": "Optional: collection to add the new template to"
                    }
                },
                "required": ["psd_url"]
            }),
        },
        ToolDefinition {
            name: "delete_psd".to_string(),
            description: Some(
                "Permanently delete a mockup template that was created from an \
                 uploaded PSD. This cannot be undone.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mockup_uuid": {
                        "type": "string",
                        "description": "UUID of the PSD-backed mockup template to delete"
                    }
                },
                "required": ["mockup_uuid"]
            }),
        },
        ToolDefinition {
            name: "list_psd_categories".to_string(),
            description: Some(
                "List the categories available for filing uploaded PSD templates."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        // === Local ===
        ToolDefinition {
            name: KNOWLEDGE_BASE_TOOL.to_string(),
            description: Some(
                "Look up built-in guidance on using the mockup API: authentication, \
                 smart objects, render options, batch rendering, print files, PSD \
                 requirements, troubleshooting. Answers locally without contacting \
                 the API."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Topic to look up",
                        "enum": [
                            "getting_started",
                            "authentication",
                            "smart_objects",
                            "render_options",
                            "batch_rendering",
                            "print_files",
                            "psd_requirements",
                            "troubleshooting"
                        ]
                    }
                },
                "required": ["topic"]
            }),
        },
    ]
}
