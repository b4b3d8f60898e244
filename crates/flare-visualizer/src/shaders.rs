// ── Fullscreen quad vertex shader (shared by every pass) ─────────────

pub const FULLSCREEN_VERTEX: &str = r#"#version 330 core

layout(location = 0) in vec2 a_pos;
layout(location = 1) in vec2 a_uv;

out vec2 v_uv;

void main() {
    v_uv = a_uv;
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

// ── Anamorphic flare ────────────────────────────────────────────────
//
// Must stay in step with flare_effects::anamorphic, which is the CPU
// reference used by the tests.

pub const FLARE_FRAGMENT: &str = r#"#version 330 core

in vec2 v_uv;

uniform sampler2D u_scene;
uniform float u_threshold;
uniform float u_scale;
uniform float u_spread;     // horizontal tap distance in UV units
uniform float u_intensity;
uniform int u_enabled;      // 0 = bypass, show the scene as-is

out vec4 frag_color;

const vec3 FLARE_TINT = vec3(0.5, 0.5, 1.0);

void main() {
    vec3 color = texture(u_scene, v_uv).rgb;

    if (u_enabled == 0) {
        frag_color = vec4(color, 1.0);
        return;
    }

    vec3 flare = vec3(0.0);

    for (int i = -8; i <= 8; i++) {
        if (i == 0) {
            continue;
        }
        float offset = float(i) * u_spread;
        vec3 sample_color = texture(u_scene, v_uv + vec2(offset, 0.0)).rgb;

        float brightness = max(sample_color.r, max(sample_color.g, sample_color.b));
        float weight = step(u_threshold, brightness);
        float decay = 1.0 / max(abs(float(i)) * 1.5, 1.0);

        flare += sample_color * weight * decay * u_scale * u_intensity * FLARE_TINT;
    }

    // Unclamped; the default framebuffer clamps on write.
    frag_color = vec4(color + flare, 1.0);
}
"#;

// ── Procedural stand-in scene ───────────────────────────────────────

pub const SCENE_FRAGMENT: &str = r#"#version 330 core

#define BLOB_COUNT 6

in vec2 v_uv;

uniform float u_aspect;               // width / height
uniform vec4 u_blobs[BLOB_COUNT];     // xy = center (UV), z = radius (UV height), w = emission
uniform vec3 u_blob_colors[BLOB_COUNT];

out vec4 frag_color;

void main() {
    // Grayscale environment, darkened radially from the center.
    float sky = mix(0.25, 0.9, v_uv.y);
    float horizon = exp(-abs(v_uv.y - 0.42) * 18.0) * 0.35;
    float env = sky + horizon;
    float falloff = clamp((1.0 - distance(v_uv, vec2(0.5)) - 0.1) / 3.9, 0.0, 1.0);
    vec3 color = vec3(env * falloff);

    for (int i = 0; i < BLOB_COUNT; i++) {
        vec4 blob = u_blobs[i];
        vec2 d = (v_uv - blob.xy) * vec2(u_aspect, 1.0);
        float dist = length(d);
        float core = 1.0 - smoothstep(blob.z * 0.6, blob.z, dist);
        float halo = exp(-(dist * dist) / (blob.z * blob.z * 6.0)) * 0.08;
        color += u_blob_colors[i] * blob.w * (core + halo);
    }

    frag_color = vec4(color, 1.0);
}
"#;

// ── Image blit ──────────────────────────────────────────────────────

pub const BLIT_FRAGMENT: &str = r#"#version 330 core

in vec2 v_uv;

uniform sampler2D u_image;

out vec4 frag_color;

void main() {
    // Image rows are stored top-down.
    frag_color = vec4(texture(u_image, vec2(v_uv.x, 1.0 - v_uv.y)).rgb, 1.0);
}
"#;
