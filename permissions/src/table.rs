use crate::Bitmask;

pub(crate) struct FlagDef {
    pub id: &'static str,
    pub name: &'static str,
    pub bit: Bitmask,
    pub auto: bool,
}

const fn flag(id: &'static str, name: &'static str, shift: u32, auto: bool) -> FlagDef {
    FlagDef {
        id,
        name,
        bit: 1 << shift,
        auto,
    }
}

pub(crate) const CATEGORIES: &[(&str, &[FlagDef])] = &[
    ("General", GENERAL),
    ("Text", TEXT),
    ("Voice", VOICE),
];

const GENERAL: &[FlagDef] = &[
    flag("administrator", "Administrator", 3, false),
    flag("view_audit_log", "View Audit Log", 7, true),
    flag("manage_guild", "Manage Server", 5, false),
    flag("manage_roles", "Manage Roles", 28, false),
    flag("manage_channels", "Manage Channels", 4, false),
    flag("kick_members", "Kick Members", 1, false),
    flag("ban_members", "Ban Members", 2, false),
    flag("create_instant_invite", "Create Instant Invite", 0, true),
    flag("change_nickname", "Change Nickname", 26, true),
    flag("manage_nicknames", "Manage Nicknames", 27, true),
    flag("manage_guild_expressions", "Manage Expressions", 30, false),
    flag("create_guild_expressions", "Create Expressions", 43, true),
    flag("manage_webhooks", "Manage Webhooks", 29, false),
    flag("view_channel", "Read Messages/View Channels", 10, true),
    flag("manage_events", "Manage Events", 33, true),
    flag("create_events", "Create Events", 44, true),
    flag("moderate_members", "Moderate Members", 40, false),
    flag("view_guild_insights", "View Server Insights", 19, true),
    flag(
        "view_creator_monetization_insights",
        "View Creator Monetization Insights",
        41,
        false,
    ),
];

const TEXT: &[FlagDef] = &[
    flag("send_messages", "Send Messages", 11, true),
    flag("create_public_threads", "Create Public Threads", 35, true),
    flag("create_private_threads", "Create Private Threads", 36, true),
    flag("send_messages_in_threads", "Send Messages in Threads", 38, true),
    flag("send_tts_messages", "Send TTS Messages", 12, true),
    flag("manage_messages", "Manage Messages", 13, false),
    flag("manage_threads", "Manage Threads", 34, false),
    flag("embed_links", "Embed Links", 14, true),
    flag("attach_files", "Attach Files", 15, true),
    flag("read_message_history", "Read Message History", 16, true),
    flag("mention_everyone", "Mention Everyone", 17, true),
    flag("use_external_emojis", "Use External Emojis", 18, true),
    flag("use_external_stickers", "Use External Stickers", 37, true),
    flag("add_reactions", "Add Reactions", 6, true),
    flag("use_application_commands", "Use Application Commands", 31, true),
];

const VOICE: &[FlagDef] = &[
    flag("connect", "Connect", 20, true),
    flag("speak", "Speak", 21, true),
    flag("stream", "Video", 9, true),
    flag("mute_members", "Mute Members", 22, true),
    flag("deafen_members", "Deafen Members", 23, true),
    flag("move_members", "Move Members", 24, true),
    flag("use_voice_activity", "Use Voice Activity", 25, true),
    flag("priority_speaker", "Priority Speaker", 8, true),
    flag("request_to_speak", "Request to Speak", 32, true),
    flag("use_embedded_activities", "Use Embedded Activities", 39, true),
    flag("use_soundboard", "Use Soundboard", 42, true),
    flag("use_external_sounds", "Use External Sounds", 45, true),
    flag("send_voice_messages", "Send Voice Messages", 46, true),
];
