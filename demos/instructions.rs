use bionic_press::{
    layout_document, render_document, FixedMeasurer, LayoutOptions, Margins, PageGeometry,
    RenderInstruction, A5,
};
use bionic_press::{In, Pt};

fn main() {
    // a synthetic fixed-advance measurer so no font files are needed
    let measurer = FixedMeasurer::new(Pt(6.0), Pt(9.0), Pt(3.0));

    let geometry = PageGeometry::new(A5, Margins::all(In(0.5)), Pt(60.0));
    let opts = LayoutOptions::new(geometry, "Fira Sans", Pt(12.0))
        .with_title("Lorem Ipsum")
        .with_bionic(true);

    let text = format!("{}\n\n{}", lipsum::lipsum(64), lipsum::lipsum(128));
    let pages = layout_document(&text, &opts, &measurer).expect("can lay out text");
    println!(
        "{} paragraphs over {} pages",
        text.split("\n\n").count(),
        pages.len()
    );

    let instructions = render_document(&text, &opts, &measurer).expect("can emit instructions");
    for (index, page) in instructions.iter().enumerate() {
        println!("--- page {} ---", index + 1);
        for instruction in page {
            match instruction {
                RenderInstruction::Text { text, x, y, font } => {
                    println!(
                        "text {:?} at ({}, {}) in {} {} {:?}",
                        text, x, y, font.family, font.size, font.weight
                    );
                }
                RenderInstruction::Rule { x1, y1, x2, y2 } => {
                    println!("rule from ({x1}, {y1}) to ({x2}, {y2})");
                }
                RenderInstruction::Image {
                    resource,
                    x,
                    y,
                    width,
                    height,
                } => {
                    println!("image {resource} at ({x}, {y}) sized {width} x {height}");
                }
            }
        }
    }
}
