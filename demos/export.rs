use bionic_press::{
    render_document, FontSet, Image, In, Info, LayoutOptions, Logo, Margins, PageGeometry,
    PdfRenderer, Pt, LETTER,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let regular_path = args.next();
    let bold_path = args.next();
    let (regular_path, bold_path) = match (regular_path, bold_path) {
        (Some(r), Some(b)) => (r, b),
        _ => {
            eprintln!("usage: export <regular.ttf> <bold.ttf> [logo.png]");
            std::process::exit(1);
        }
    };

    let regular = std::fs::read(&regular_path).expect("can read regular font");
    let bold = std::fs::read(&bold_path).expect("can read bold font");
    let fonts = FontSet::load(regular, bold).expect("can parse fonts");

    let geometry = PageGeometry::new(LETTER, Margins::all(In(0.75)), Pt(72.0));
    let mut opts = LayoutOptions::new(geometry.clone(), fonts.family(), Pt(12.0))
        .with_title("Lorem Ipsum")
        .with_bionic(true);

    let mut renderer = PdfRenderer::new(&fonts);
    renderer.set_info(
        Info::new()
            .title("Lorem Ipsum")
            .subject("Development Test / Example")
            .clone(),
    );
    if let Some(logo_path) = args.next() {
        let logo = Image::load_from_disk(&logo_path).expect("can load logo");
        let aspect = logo.width as f32 / logo.height as f32;
        let height = Pt(48.0);
        opts = opts.with_logo(Logo {
            resource: "logo".to_string(),
            width: height * aspect,
            height,
        });
        renderer.add_image("logo", logo);
    }

    let text = format!(
        "{}\n\n{}\n\n{}",
        lipsum::lipsum(96),
        lipsum::lipsum(256),
        lipsum::lipsum(192)
    );
    let pages = render_document(&text, &opts, &fonts).expect("can lay out text");

    let mut out = std::fs::File::create("lorem-ipsum.pdf").expect("can create output file");
    renderer
        .write(&geometry, &pages, &mut out)
        .expect("can write pdf");
    println!("wrote lorem-ipsum.pdf ({} pages)", pages.len());
}
