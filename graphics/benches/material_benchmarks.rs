use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use camelot_core::math::Vec4;
use camelot_core::texture::{TextureFormat, TextureType};
use camelot_graphics::{
    Material, RenderSystemKey, Shader, Texture, TextureBindingSlot, TextureManager,
};

// ---------------------------------------------------------------------------
// Texture binding slots
// ---------------------------------------------------------------------------

fn bench_texture_transform(c: &mut Criterion) {
    c.bench_function("texture_transform_recompute", |b| {
        let mut slot = TextureBindingSlot::new();
        let mut angle = 0.0f32;
        b.iter(|| {
            angle += 0.01;
            slot.set_texture_scroll(angle, -angle);
            slot.set_texture_scale(2.0, 0.5);
            slot.set_texture_rotate(angle);
            black_box(*slot.texture_transform());
        });
    });
}

fn bench_animated_resolution(c: &mut Criterion) {
    let textures = Arc::new(TextureManager::new());
    for i in 0..16 {
        textures.insert(Texture::new(
            format!("flame_{i}.png"),
            TextureType::Type2D,
            TextureFormat::Rgba8Unorm,
            64,
            64,
        ));
    }

    c.bench_function("animated_slot_resolve_16_frames", |b| {
        let mut slot = TextureBindingSlot::new();
        slot.set_animated_texture_name("flame.png", 16, 1.0);
        slot.load(textures.clone());
        b.iter(|| {
            slot.advance_animation(1.0 / 60.0);
            black_box(slot.current_texture());
        });
    });
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

fn many_technique_shader(count: usize) -> Shader {
    let mut shader = Shader::new("many");
    for i in 0..count {
        let pass = shader.add_technique(format!("RenderSystem{i}"), "ForwardRenderer").add_pass();
        pass.create_texture_slot("diffuse");
        pass.create_texture_slot("normal");
    }
    shader
}

fn bench_technique_resolution(c: &mut Criterion) {
    let mut material = Material::new("many");
    material.set_shader(many_technique_shader(32));
    let key = RenderSystemKey::new("RenderSystem31", "ForwardRenderer");

    c.bench_function("best_technique_last_of_32", |b| {
        b.iter(|| black_box(material.best_technique(black_box(&key))));
    });
}

fn bench_apply_parameters(c: &mut Criterion) {
    let diffuse = Arc::new(Texture::new(
        "diffuse.png",
        TextureType::Type2D,
        TextureFormat::Rgba8Unorm,
        256,
        256,
    ));
    let mut material = Material::new("many");
    material.set_shader(many_technique_shader(8));
    material.set_texture("diffuse", diffuse);
    material.set_vec4("tint", Vec4::new(1.0, 1.0, 1.0, 1.0));

    c.bench_function("apply_parameters_8_techniques", |b| {
        b.iter(|| black_box(material.apply_parameters()));
    });
}

criterion_group!(
    benches,
    bench_texture_transform,
    bench_animated_resolution,
    bench_technique_resolution,
    bench_apply_parameters,
);
criterion_main!(benches);
