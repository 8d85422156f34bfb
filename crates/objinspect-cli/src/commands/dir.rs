use objinspect_inspect::format::render_listing;
use objinspect_inspect::{FormatOptions, Inspector, MemberFilter};

use crate::cli::{DirArgs, GlobalFlags, OutputFormat};
use crate::output;

pub fn handle(args: &DirArgs, flags: &GlobalFlags, options: &FormatOptions) -> anyhow::Result<String> {
    let module = super::load(&args.file)?;
    let inspector = Inspector::new();
    match flags.format {
        OutputFormat::Pretty => Ok(render_listing(
            &inspector.module_listing(&module),
            args.dunders,
            options,
        )),
        format => {
            let filter = MemberFilter {
                dunders: args.dunders,
                ..MemberFilter::default()
            };
            output::render_all(&super::inspect_all(&inspector, &module, &filter), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixture;

    #[test]
    fn listing_sections() {
        let (_dir, path) = fixture::write();
        let args = DirArgs {
            file: path,
            dunders: false,
        };
        let flags = GlobalFlags {
            format: OutputFormat::Pretty,
            color: None,
        };
        let options = FormatOptions {
            separator: true,
            max_width: Some(40),
            ..FormatOptions::default()
        };
        let out = handle(&args, &flags, &options).unwrap();
        let rule = "─".repeat(40);
        assert!(out.starts_with(&rule));
        assert!(out.ends_with(&rule));
        assert!(out.contains("Functions:\n  pow(x, y, /)"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = DirArgs {
            file: "/nonexistent/nowhere.py".into(),
            dunders: false,
        };
        let flags = GlobalFlags {
            format: OutputFormat::Json,
            color: None,
        };
        let error = handle(&args, &flags, &FormatOptions::default()).unwrap_err();
        assert!(format!("{error:#}").contains("failed to load module"));
    }
}
