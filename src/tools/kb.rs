//! Static knowledge base for mockup-workflow guidance.
//!
//! The `knowledge_base` tool answers "how do I use this API" questions
//! without a network round trip: a constant-time lookup into a topic-keyed
//! table compiled into the binary. Identical inputs yield byte-identical
//! output.

/// One knowledge base entry.
struct Topic {
    name: &'static str,
    guidance: &'static str,
}

/// Topic table. Ordered for stable `topics()` output.
const TOPICS: &[Topic] = &[
    Topic {
        name: "getting_started",
        guidance: "Start with list_catalogs to browse public mockup templates, or \
                   list_mockups to see templates in your own workspace. Every template is \
                   identified by a UUID. Use get_mockup with that UUID to inspect its smart \
                   objects before rendering. To produce an image, call render_mockup with \
                   the mockup UUID and one entry per smart object you want to fill.",
    },
    Topic {
        name: "authentication",
        guidance: "Every API-backed tool needs a Dynamic Mockups API key. Supply it \
                   per-request via an 'Authorization: Bearer <key>' or 'x-api-key' header \
                   on the HTTP transport, or configure a process-wide key via the \
                   DYNAMIC_MOCKUPS_API_KEY environment variable, the --api-key flag, or \
                   the config file. A per-request key always overrides the configured one. \
                   Keys are created in the Dynamic Mockups dashboard under Settings > API.",
    },
    Topic {
        name: "smart_objects",
        guidance: "A smart object is a placeholder region inside a mockup template where \
                   a design is composited. get_mockup returns each smart object's UUID, \
                   size, and print-area presets. When rendering, pass smart_objects as an \
                   array of objects: each needs the smart object 'uuid' plus an 'asset' \
                   ({\"url\": ...} pointing at your artwork), and may set 'color' (hex) or \
                   'print_area_preset_uuid'. Smart objects you omit render with the \
                   template's default content.",
    },
    Topic {
        name: "render_options",
        guidance: "render_mockup accepts optional export_options: 'image_format' (webp, \
                   png, or jpg), 'image_size' (width in pixels, up to the template's \
                   native size), and 'mode' ('view' for a temporary preview URL or \
                   'download' for a persistent one). Omit export_options entirely for \
                   webp at native size. export_label tags the render so it is easy to \
                   find in the dashboard.",
    },
    Topic {
        name: "batch_rendering",
        guidance: "render_batch queues many renders in one call: pass 'renders' as an \
                   array where each entry has the same shape as a render_mockup request. \
                   The upstream processes entries independently and in no guaranteed \
                   order. Batches are asynchronous — poll get_render_status with each \
                   returned render UUID. Keep batches modest; very large batches are the \
                   most common cause of timeouts.",
    },
    Topic {
        name: "print_files",
        guidance: "export_print_files produces production-ready files (print-resolution, \
                   no mockup scene) for the given mockup and smart objects. The request \
                   shape matches render_mockup; the output honours each smart object's \
                   print-area preset dimensions rather than the on-screen preview size.",
    },
    Topic {
        name: "psd_requirements",
        guidance: "upload_psd turns your own Photoshop template into a renderable mockup. \
                   The PSD must be reachable at a public URL (psd_url), use RGB colour, \
                   stay under 1 GB, and contain at least one smart object layer. Optional \
                   psd_category_id and collection_uuid file the result. Processing is \
                   asynchronous; the new template appears in list_mockups when ready. \
                   delete_psd removes an uploaded template permanently.",
    },
    Topic {
        name: "troubleshooting",
        guidance: "401 responses mean the API key is missing or wrong — see the \
                   'authentication' topic. 404 on a render or mockup UUID usually means \
                   the UUID belongs to a different workspace. Timeouts on render_batch \
                   mean the batch is too large; split it. 5xx responses and network \
                   errors are upstream or connectivity problems — nothing is retried \
                   automatically, so retry the call yourself once the upstream recovers.",
    },
];

/// Looks up guidance for a topic. Constant-time in the number of calls,
/// linear in the (small, fixed) topic count.
#[must_use]
pub fn lookup(topic: &str) -> Option<&'static str> {
    TOPICS
        .iter()
        .find(|entry| entry.name == topic)
        .map(|entry| entry.guidance)
}

/// All topic names, in table order.
#[must_use]
pub fn topics() -> Vec<&'static str> {
    TOPICS.iter().map(|entry| entry.name).collect()
}
