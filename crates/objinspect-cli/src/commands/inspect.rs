use anyhow::Context;
use objinspect_config::ObjinspectConfig;
use objinspect_inspect::format::render_listing;
use objinspect_inspect::{FormatOptions, Inspector};

use crate::cli::{GlobalFlags, InspectArgs, OutputFormat};
use crate::output;

pub fn handle(
    args: &InspectArgs,
    flags: &GlobalFlags,
    config: &ObjinspectConfig,
    options: &FormatOptions,
) -> anyhow::Result<String> {
    let module = super::load(&args.file)?;
    let filter = args.members.apply(config.member_filter());
    let inspector = Inspector::new();

    let Some(target) = args.target.as_deref() else {
        return match flags.format {
            OutputFormat::Pretty => Ok(render_listing(
                &inspector.module_listing(&module),
                filter.dunders,
                options,
            )),
            format => output::render_all(&super::inspect_all(&inspector, &module, &filter), format),
        };
    };

    let object = module
        .resolve(target)
        .with_context(|| format!("cannot find '{target}' in module {}", module.name()))?;
    let inspected = inspector
        .inspect(&object, &filter)
        .with_context(|| format!("cannot inspect '{target}'"))?;
    output::render(&inspected, flags.format, options)
}
